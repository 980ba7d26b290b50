//! Utility functions and chain diagnostics for `ChainedHashMap`

use crate::ChainedHashMap;
use std::hash::Hash;

/// Structural diagnostics over a map's collision chains.
///
/// These observe bucket shape only; no key or value leaves the map through
/// this trait. Used by the load-factor experiment binary and by tests to
/// watch how chains behave as occupancy rises.
pub trait ChainMetrics {
    /// Returns the length of the longest collision chain
    fn longest_chain(&self) -> usize;

    /// Returns the mean chain length over occupied buckets, or 0.0 for an
    /// empty map
    fn average_chain(&self) -> f64;

    /// Returns the number of buckets currently holding at least one entry
    fn occupied_buckets(&self) -> usize;
}

impl<K, V> ChainMetrics for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn longest_chain(&self) -> usize {
        self.chain_lengths().max().unwrap_or(0)
    }

    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    fn average_chain(&self) -> f64 {
        let occupied = self.occupied_buckets();
        if occupied == 0 {
            return 0.0;
        }
        self.len() as f64 / occupied as f64
    }

    fn occupied_buckets(&self) -> usize {
        self.chain_lengths().filter(|&length| length > 0).count()
    }
}

/// Creates a `ChainedHashMap` from an iterator of key-value pairs
pub fn from_iter<K, V, I>(pairs: I) -> ChainedHashMap<K, V>
where
    K: Eq + Hash,
    I: IntoIterator<Item = (K, V)>,
{
    let mut map = ChainedHashMap::new();
    map.extend(pairs);
    map
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items,
    clippy::arithmetic_side_effects
)]
mod tests {
    use std::hash::Hasher;

    use super::*;

    /// Key hashing to a constant so every entry lands in the same bucket
    #[derive(Debug, PartialEq, Eq)]
    struct SameSlot(u8);

    impl Hash for SameSlot {
        fn hash<H: Hasher>(&self, state: &mut H) {
            state.write_u8(0);
        }
    }

    #[test]
    fn test_from_iter() {
        let data = vec![("a".to_string(), 1), ("b".to_string(), 2), ("c".to_string(), 3)];

        let map = from_iter(data);

        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("b"), Some(&2));
        assert_eq!(map.get("c"), Some(&3));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_metrics_on_empty_map() {
        let map: ChainedHashMap<String, i32> = ChainedHashMap::new();

        assert_eq!(map.longest_chain(), 0);
        assert_eq!(map.occupied_buckets(), 0);
        assert!(map.average_chain().abs() < f64::EPSILON);
    }

    #[test]
    fn test_metrics_under_full_collision() {
        let mut map = ChainedHashMap::with_capacity(8).unwrap();
        map.insert(SameSlot(1), ());
        map.insert(SameSlot(2), ());
        map.insert(SameSlot(3), ());

        assert_eq!(map.occupied_buckets(), 1);
        assert_eq!(map.longest_chain(), 3);
        assert!((map.average_chain() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_metrics_account_for_every_entry() {
        let mut map = ChainedHashMap::new();
        for i in 0..8 {
            map.insert(i.to_string(), i);
        }

        let occupied = map.occupied_buckets();
        assert!((1..=8).contains(&occupied));
        assert!(map.longest_chain() >= 1);

        #[allow(clippy::cast_precision_loss)]
        let total = map.average_chain() * occupied as f64;
        assert!((total - 8.0).abs() < 1e-9);
    }
}
