use std::{
    borrow::Borrow,
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    mem,
};

use crate::error::MapConfigError;

/// Number of buckets a map starts with when no capacity is requested
const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Load factor applied when the caller does not supply one
const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// Hard ceiling on the bucket count; growth saturates here instead of overflowing
const MAX_CAPACITY: usize = 1 << 30;

/// A key-value entry together with the hash it was stored under.
///
/// The key and hash never change for the entry's lifetime; only the value is
/// replaced in place. Keeping the hash lets lookups skip the key comparison
/// on a mismatch and lets a rehash relocate the entry without hashing again.
#[derive(Debug, Clone)]
struct Entry<K, V> {
    /// Hash of `key`, computed once at insertion
    hash: u64,
    /// The key in the key-value pair
    key: K,
    /// The value associated with the key
    value: V,
}

/// A bucket holds every entry whose hash maps to its slot, in an owned
/// growable sequence rather than a linked chain.
type Bucket<K, V> = Vec<Entry<K, V>>;

/// A hash map resolving collisions by separate chaining.
///
/// Entries live in a bucket array; each bucket owns the chain of entries
/// whose hashes map to its slot. When the entry count exceeds
/// `floor(capacity * load_factor)` the array doubles and every entry is
/// relocated to the slot its cached hash implies under the new capacity, so
/// lookups stay amortized O(1) as the map grows. Capacity never shrinks;
/// `clear` empties the buckets but keeps them allocated.
///
/// Note: This implementation is not thread-safe. Shared access requires an
/// external lock such as `std::sync::Mutex`.
#[derive(Debug, Clone)]
pub struct ChainedHashMap<K, V> {
    /// The bucket array; an empty vector is the unallocated state
    buckets: Vec<Bucket<K, V>>,
    /// Current number of entries in the map
    size: usize,
    /// Target maximum ratio of entries to buckets, in `(0.0, 1.0]`
    load_factor: f64,
    /// Entry count beyond which the next insert grows the bucket array
    threshold: usize,
}

impl<K, V> Default for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    /// Creates a new `ChainedHashMap` with 16 buckets and a load factor of 0.75
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR)
    }

    /// Creates a new `ChainedHashMap` with the specified number of buckets and
    /// the default load factor of 0.75.
    ///
    /// # Errors
    ///
    /// Returns [`MapConfigError::ZeroCapacity`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, MapConfigError> {
        Self::with_capacity_and_load_factor(capacity, DEFAULT_LOAD_FACTOR)
    }

    /// Creates a new `ChainedHashMap` with the specified number of buckets and
    /// load factor. Both are checked before anything is allocated.
    ///
    /// # Errors
    ///
    /// Returns [`MapConfigError::ZeroCapacity`] if `capacity` is zero, or
    /// [`MapConfigError::InvalidLoadFactor`] if `load_factor` is NaN, not
    /// positive, or greater than 1.0.
    pub fn with_capacity_and_load_factor(
        capacity: usize,
        load_factor: f64,
    ) -> Result<Self, MapConfigError> {
        if capacity == 0 {
            return Err(MapConfigError::ZeroCapacity);
        }
        if load_factor.is_nan() || load_factor <= 0.0 || load_factor > 1.0 {
            return Err(MapConfigError::InvalidLoadFactor(load_factor));
        }
        Ok(Self::with_parts(capacity, load_factor))
    }

    /// Allocates the bucket array and derives the initial threshold.
    /// Callers have already validated `capacity` and `load_factor`.
    fn with_parts(capacity: usize, load_factor: f64) -> Self {
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, Vec::new);
        Self { buckets, size: 0, load_factor, threshold: resize_threshold(capacity, load_factor) }
    }

    /// Computes the hash for a key
    #[allow(clippy::unused_self)]
    fn hash<Q: ?Sized + Hash>(&self, key: &Q) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the key was already present its value is replaced in place and the
    /// previous value is returned; the key and its cached hash are untouched.
    /// A new key returns `None`, and the bucket array grows when the entry
    /// count passes the resize threshold.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        // Constructors always allocate, but growth stays total over the
        // unallocated state as well.
        if self.buckets.is_empty() {
            self.grow();
        }

        let hash = self.hash(&key);
        let index = bucket_index(hash, self.buckets.len());
        let bucket = self.buckets.get_mut(index)?;

        if let Some(entry) = bucket.iter_mut().find(|entry| entry.hash == hash && entry.key == key)
        {
            return Some(mem::replace(&mut entry.value, value));
        }

        bucket.push(Entry { hash, key, value });
        self.size = self.size.saturating_add(1);
        if self.size > self.threshold {
            self.grow();
        }
        None
    }

    /// Retrieves a reference to the value stored for a key.
    ///
    /// `None` means the key is absent; a present key always yields its value,
    /// so absence is never conflated with any stored sentinel.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.size == 0 {
            return None;
        }

        let hash = self.hash(key);
        let index = bucket_index(hash, self.buckets.len());
        self.buckets
            .get(index)?
            .iter()
            .find(|entry| entry.hash == hash && entry.key.borrow() == key)
            .map(|entry| &entry.value)
    }

    /// Retrieves a mutable reference to the value stored for a key
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.size == 0 {
            return None;
        }

        let hash = self.hash(key);
        let index = bucket_index(hash, self.buckets.len());
        self.buckets
            .get_mut(index)?
            .iter_mut()
            .find(|entry| entry.hash == hash && entry.key.borrow() == key)
            .map(|entry| &mut entry.value)
    }

    /// Returns true if the map holds an entry for the given key
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns true if at least one entry maps to a value equal to `value`.
    ///
    /// Values are not hashed, so this walks every chain in every bucket:
    /// O(len), inherently slower than a key lookup.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        if self.size == 0 {
            return false;
        }
        self.buckets.iter().flat_map(|bucket| bucket.iter()).any(|entry| entry.value == *value)
    }

    /// Removes the entry for a key, returning its value.
    ///
    /// Removing an absent key is a no-op returning `None`. Removal never
    /// shrinks the bucket array.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.size == 0 {
            return None;
        }

        let hash = self.hash(key);
        let index = bucket_index(hash, self.buckets.len());
        let bucket = self.buckets.get_mut(index)?;
        let position =
            bucket.iter().position(|entry| entry.hash == hash && entry.key.borrow() == key)?;

        // Order within a chain is not part of the contract.
        let entry = bucket.swap_remove(position);
        self.size = self.size.saturating_sub(1);
        Some(entry.value)
    }

    /// Returns the number of entries in the map
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Clears the map, removing every entry.
    ///
    /// The bucket array keeps its current capacity, so the resize threshold
    /// is unchanged.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.size = 0;
    }

    /// Returns the number of buckets in the map
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the configured load factor, the target maximum ratio of
    /// entries to buckets
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Returns the current ratio of entries to buckets
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn occupancy(&self) -> f64 {
        if self.buckets.is_empty() {
            return 0.0;
        }
        self.size as f64 / self.buckets.len() as f64
    }

    /// Lengths of every bucket's chain, in slot order. Exposes shape only,
    /// never contents.
    pub(crate) fn chain_lengths(&self) -> impl Iterator<Item = usize> {
        self.buckets.iter().map(Vec::len)
    }

    /// Grows the bucket array and redistributes every entry.
    ///
    /// An unallocated table grows to the default capacity; otherwise the
    /// capacity doubles, saturating at the hard ceiling. The threshold is
    /// recomputed for the new capacity before migration. Entries are moved
    /// into the slot their cached hash implies under the new capacity, so
    /// nothing is rehashed or cloned; the old array is discarded entirely.
    fn grow(&mut self) {
        let old_capacity = self.buckets.len();
        let new_capacity = if old_capacity == 0 {
            DEFAULT_INITIAL_CAPACITY
        } else {
            old_capacity.saturating_mul(2).min(MAX_CAPACITY)
        };
        self.threshold = resize_threshold(new_capacity, self.load_factor);

        let mut new_buckets: Vec<Bucket<K, V>> = Vec::with_capacity(new_capacity);
        new_buckets.resize_with(new_capacity, Vec::new);

        for bucket in self.buckets.drain(..) {
            for entry in bucket {
                let index = bucket_index(entry.hash, new_capacity);
                if let Some(slot) = new_buckets.get_mut(index) {
                    slot.push(entry);
                }
            }
        }

        self.buckets = new_buckets;
    }
}

/// Maps a hash to a slot in a bucket array of the given size.
///
/// Plain modulo rather than a power-of-two mask: the bucket count is
/// whatever positive size the caller asked for, so masking is not
/// available. A zero bucket count yields slot 0; callers only index
/// allocated arrays.
#[allow(clippy::cast_possible_truncation)]
fn bucket_index(hash: u64, bucket_count: usize) -> usize {
    // The remainder is below the bucket count, which is capped at 2^30,
    // so the narrowing cast is lossless.
    hash.checked_rem(bucket_count as u64).map_or(0, |remainder| remainder as usize)
}

/// Derives the entry count that forces the next growth:
/// `floor(capacity * load_factor)`
#[allow(
    clippy::arithmetic_side_effects,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn resize_threshold(capacity: usize, load_factor: f64) -> usize {
    (capacity as f64 * load_factor).floor() as usize
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items,
    clippy::arithmetic_side_effects
)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    /// Key whose hash is always the same, forcing every entry into one chain
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Collide(u32);

    impl Hash for Collide {
        fn hash<H: Hasher>(&self, state: &mut H) {
            state.write_u64(0);
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut map = ChainedHashMap::new();
        assert_eq!(map.insert("key1".to_string(), 1), None);
        assert_eq!(map.insert("key2".to_string(), 2), None);
        assert_eq!(map.insert("key3".to_string(), 3), None);

        assert_eq!(map.get("key1"), Some(&1));
        assert_eq!(map.get("key2"), Some(&2));
        assert_eq!(map.get("key3"), Some(&3));
        assert_eq!(map.get("key4"), None);
    }

    #[test]
    fn test_update_returns_previous_value() {
        let mut map = ChainedHashMap::new();
        assert_eq!(map.insert("key1".to_string(), 1), None);
        assert_eq!(map.insert("key1".to_string(), 10), Some(1));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("key1"), Some(&10));
    }

    #[test]
    fn test_get_mut() {
        let mut map = ChainedHashMap::new();
        map.insert("key1".to_string(), 1);

        if let Some(value) = map.get_mut("key1") {
            *value += 10;
        }

        assert_eq!(map.get("key1"), Some(&11));
        assert_eq!(map.get_mut("missing"), None);
    }

    #[test]
    fn test_remove() {
        let mut map = ChainedHashMap::new();
        map.insert("key1".to_string(), 1);
        map.insert("key2".to_string(), 2);

        assert_eq!(map.remove("key1"), Some(1));
        assert_eq!(map.get("key1"), None);
        assert!(!map.contains_key("key1"));
        assert_eq!(map.get("key2"), Some(&2));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut map = ChainedHashMap::new();
        map.insert("key1".to_string(), 1);

        assert_eq!(map.remove("key2"), None);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("key1"), Some(&1));
    }

    #[test]
    fn test_len_and_is_empty() {
        let mut map = ChainedHashMap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);

        map.insert("key1".to_string(), 1);
        assert!(!map.is_empty());
        assert_eq!(map.len(), 1);

        map.insert("key2".to_string(), 2);
        assert_eq!(map.len(), 2);

        map.remove("key1");
        assert_eq!(map.len(), 1);

        map.remove("key2");
        assert!(map.is_empty());
    }

    #[test]
    fn test_contains_key() {
        let mut map = ChainedHashMap::new();
        map.insert("a".to_string(), 1);

        assert!(map.contains_key("a"));
        assert!(!map.contains_key("b"));
    }

    #[test]
    fn test_contains_value() {
        let mut map = ChainedHashMap::new();
        assert!(!map.contains_value(&1));

        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);

        assert!(map.contains_value(&1));
        assert!(map.contains_value(&2));
        assert!(!map.contains_value(&3));

        map.remove("a");
        assert!(!map.contains_value(&1));
    }

    #[test]
    fn test_growth_doubles_capacity() {
        let mut map = ChainedHashMap::with_capacity(4).unwrap();
        assert_eq!(map.capacity(), 4);

        // threshold = floor(4 * 0.75) = 3; the fourth insert crosses it
        map.insert("k1".to_string(), 1);
        map.insert("k2".to_string(), 2);
        map.insert("k3".to_string(), 3);
        assert_eq!(map.capacity(), 4);

        map.insert("k4".to_string(), 4);
        assert_eq!(map.capacity(), 8);
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_resize_keeps_all_entries() {
        let mut map = ChainedHashMap::with_capacity(2).unwrap();
        for i in 0..100 {
            map.insert(format!("key{i}"), i);
        }

        assert_eq!(map.len(), 100);
        assert!(map.capacity() >= 100);
        for i in 0..100 {
            assert_eq!(map.get(&format!("key{i}")), Some(&i));
        }
    }

    #[test]
    fn test_clear_preserves_capacity() {
        let mut map = ChainedHashMap::with_capacity(4).unwrap();
        for i in 0..10 {
            map.insert(i.to_string(), i);
        }
        let grown = map.capacity();

        map.clear();

        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.capacity(), grown);
        for i in 0..10 {
            assert_eq!(map.get(&i.to_string()), None);
        }

        // The unchanged capacity keeps the next growth point where it was.
        map.insert("again".to_string(), 0);
        assert_eq!(map.capacity(), grown);
    }

    #[test]
    fn test_collision_chain() {
        let mut map = ChainedHashMap::with_capacity(8).unwrap();
        map.insert(Collide(1), "one");
        map.insert(Collide(2), "two");
        map.insert(Collide(3), "three");

        // Same hash, different keys: lookups fall through to key equality.
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(&Collide(1)), Some(&"one"));
        assert_eq!(map.get(&Collide(2)), Some(&"two"));
        assert_eq!(map.get(&Collide(3)), Some(&"three"));
        assert_eq!(map.get(&Collide(4)), None);

        assert_eq!(map.insert(Collide(2), "TWO"), Some("two"));
        assert_eq!(map.len(), 3);

        assert_eq!(map.remove(&Collide(1)), Some("one"));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&Collide(2)), Some(&"TWO"));
        assert_eq!(map.get(&Collide(3)), Some(&"three"));
    }

    #[test]
    fn test_collision_chain_survives_growth() {
        let mut map = ChainedHashMap::with_capacity_and_load_factor(1, 1.0).unwrap();
        for i in 0..50 {
            map.insert(Collide(i), i);
        }

        assert_eq!(map.len(), 50);
        for i in 0..50 {
            assert_eq!(map.get(&Collide(i)), Some(&i));
        }
    }

    #[test]
    fn test_construction_rejects_zero_capacity() {
        let result = ChainedHashMap::<String, i32>::with_capacity(0);
        assert_eq!(result.unwrap_err(), MapConfigError::ZeroCapacity);
    }

    #[test]
    fn test_construction_rejects_bad_load_factor() {
        for bad in [0.0, -0.5, 1.5, f64::NAN] {
            let result = ChainedHashMap::<String, i32>::with_capacity_and_load_factor(16, bad);
            assert!(matches!(result, Err(MapConfigError::InvalidLoadFactor(_))));
        }

        // 1.0 is the inclusive upper bound
        let full = ChainedHashMap::<String, i32>::with_capacity_and_load_factor(16, 1.0);
        assert!(full.is_ok());
    }

    #[test]
    fn test_load_factor_and_occupancy() {
        let mut map = ChainedHashMap::with_capacity_and_load_factor(16, 0.5).unwrap();
        assert!((map.load_factor() - 0.5).abs() < f64::EPSILON);
        assert!(map.occupancy().abs() < f64::EPSILON);

        for i in 0..4 {
            map.insert(i.to_string(), i);
        }
        assert!((map.occupancy() - 4.0 / 16.0).abs() < 0.01);
    }

    #[test]
    fn test_extend() {
        let mut map = ChainedHashMap::new();
        map.extend(vec![("a".to_string(), 1), ("b".to_string(), 2)]);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("b"), Some(&2));
    }

    #[test]
    fn test_demo_scenario() {
        let mut map = ChainedHashMap::new();
        map.insert("one".to_string(), 1);
        map.insert("two".to_string(), 2);
        map.insert("three".to_string(), 3);
        assert_eq!(map.len(), 3);

        assert_eq!(map.get("one"), Some(&1));
        assert_eq!(map.get("four"), None);

        assert_eq!(map.remove("two"), Some(2));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("two"), None);
        assert_eq!(map.get("one"), Some(&1));
        assert_eq!(map.get("three"), Some(&3));
    }

    proptest! {
        #[test]
        fn test_matches_std_hash_map(
            ops in proptest::collection::vec((any::<u8>(), any::<i32>(), any::<bool>()), 0..256)
        ) {
            let mut map = ChainedHashMap::with_capacity_and_load_factor(4, 0.75).unwrap();
            let mut model = std::collections::HashMap::new();

            for (key, value, is_insert) in ops {
                if is_insert {
                    prop_assert_eq!(map.insert(key, value), model.insert(key, value));
                } else {
                    prop_assert_eq!(map.remove(&key), model.remove(&key));
                }
                prop_assert_eq!(map.len(), model.len());
            }

            for key in 0..=u8::MAX {
                prop_assert_eq!(map.get(&key), model.get(&key));
                prop_assert_eq!(map.contains_key(&key), model.contains_key(&key));
            }
        }
    }
}
