//! # Cache Traits
//!
//! A small trait hierarchy so embedding code can be written against cache
//! capabilities rather than a concrete type.
//!
//! ```text
//!   ┌─────────────────────────────────────┐
//!   │        ReadOnlyCache<K, V>          │
//!   │  contains(&, &K) → bool             │
//!   │  len(&) → usize                     │
//!   │  is_empty(&) → bool                 │
//!   │  capacity(&) → usize                │
//!   └──────────────────┬──────────────────┘
//!                      ▼
//!   ┌─────────────────────────────────────┐
//!   │          CoreCache<K, V>            │
//!   │  insert(&mut, K, V) → Option<V>     │
//!   │  get(&mut, &K) → Option<&V>         │
//!   │  clear(&mut)                        │
//!   └──────────────────┬──────────────────┘
//!                      ▼
//!   ┌─────────────────────────────────────┐
//!   │         MutableCache<K, V>          │
//!   │  remove(&mut, &K) → Option<V>       │
//!   │  remove_batch(&mut, &[K])           │
//!   └─────────────────────────────────────┘
//! ```
//!
//! `get` takes `&mut self`: on an adaptive cache a read is also a policy
//! event (it can promote the entry). Read-only queries such as `contains`
//! never change policy state.
//!
//! ## Thread Safety
//!
//! None of these traits imply internal synchronization. Wrap the cache in a
//! `Mutex` (or give it a single owning task) to share it.

/// Queries that never touch replacement state.
pub trait ReadOnlyCache<K, V> {
    /// Returns `true` if `key` is resident.
    fn contains(&self, key: &K) -> bool;

    /// Number of resident entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of resident entries.
    fn capacity(&self) -> usize;
}

/// Operations every cache supports.
///
/// # Example
///
/// ```
/// use arckit::policy::arc::ArcCache;
/// use arckit::traits::CoreCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = ArcCache::new(8);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.get(&1).map(String::as_str), Some("one"));
/// ```
pub trait CoreCache<K, V>: ReadOnlyCache<K, V> {
    /// Inserts or updates `key`; returns the previous resident value.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Returns the resident value for `key`, recording the access.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Drops all entries and policy state.
    fn clear(&mut self);
}

/// Caches that support removal of arbitrary keys.
///
/// # Example
///
/// ```
/// use arckit::policy::arc::ArcCache;
/// use arckit::traits::{CoreCache, MutableCache, ReadOnlyCache};
///
/// fn invalidate_keys<C: MutableCache<u64, String>>(cache: &mut C, keys: &[u64]) {
///     for key in keys {
///         cache.remove(key);
///     }
/// }
///
/// let mut cache = ArcCache::new(8);
/// cache.insert(1, "one".to_string());
/// cache.insert(2, "two".to_string());
/// invalidate_keys(&mut cache, &[1]);
/// assert!(!cache.contains(&1));
/// assert_eq!(cache.len(), 1);
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes `key`; returns its value if it was resident.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes every key in `keys`, returning results in the same order.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|key| self.remove(key)).collect()
    }
}
