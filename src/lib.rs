//! # Chainmap
//!
//! A Rust implementation of a hash map with separate chaining.
//!
//! `ChainedHashMap` stores entries in an array of buckets; each bucket owns
//! the chain of entries whose keys hash to its slot. When the entry count
//! passes `capacity * load_factor` the bucket array doubles and every entry
//! is redistributed, keeping lookups amortized O(1) as the map grows.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chainmap::ChainedHashMap;
//!
//! // Create a new hash map
//! let mut map = ChainedHashMap::new();
//!
//! // Insert values
//! map.insert("apple".to_string(), 1);
//! map.insert("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//! assert!(map.contains_key("banana"));
//!
//! // Update values; the previous value comes back
//! assert_eq!(map.insert("apple".to_string(), 10), Some(1));
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! ```
//!
//! ## Tuning capacity and load factor
//!
//! Both knobs are validated at construction: the capacity must be at least
//! one bucket and the load factor must lie in `(0.0, 1.0]`.
//!
//! ```rust
//! use chainmap::{ChainedHashMap, MapConfigError};
//!
//! let mut map = ChainedHashMap::with_capacity_and_load_factor(4, 0.5)?;
//!
//! for word in ["one", "two", "three", "four", "five"] {
//!     map.insert(word, word.len());
//! }
//!
//! // The table rehashed itself as it filled; nothing was lost.
//! assert_eq!(map.len(), 5);
//! assert!(map.capacity() >= 8);
//! assert_eq!(map.get("three"), Some(&5));
//! # Ok::<(), MapConfigError>(())
//! ```
//!
//! ## Concurrency
//!
//! The map is single-threaded by design: every mutation takes `&mut self`
//! and there is no internal synchronization. Share it across threads by
//! wrapping it in an external lock such as `std::sync::Mutex`, or by
//! partitioning keys over independently locked maps.

/// Module implementing the separate-chaining hash map
mod chained_hashmap;
/// Construction error types
mod error;
/// Utility functions and chain diagnostics for the hash map
mod utils;

pub use chained_hashmap::ChainedHashMap;
pub use error::MapConfigError;
pub use utils::ChainMetrics;
pub use utils::from_iter;
