//! Adaptive Replacement Cache (ARC) replacement policy.
//!
//! ARC splits its resident capacity between a recency discipline (keys seen
//! once) and a frequency discipline (keys seen at least twice). Keys evicted
//! from either side are remembered, without their values, in a ghost list.
//! A later `set` on a ghost key is evidence that its side was starved, so the
//! pivot `p` (the recency side's share of capacity) moves toward it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                           ArcCache<K, V> Layout                             │
//! │                                                                             │
//! │   live: Segment<K, V>                     ghost: Segment<K, ()>             │
//! │   ┌─────────────────────────────────┐     ┌─────────────────────────────┐   │
//! │   │ table: FxHashMap<K, Handle>     │     │ table: FxHashMap<K, Handle> │   │
//! │   │                                 │     │                             │   │
//! │   │ recency   (live MRU list)       │     │ recency   (ghost MRU list)  │   │
//! │   │  front [k,v] ◄─► [k,v] back ────┼────►│  front [k] ◄─► [k] back ──► │ drop
//! │   │                                 │evict│                             │   │
//! │   │ frequency (live MFU list)       │     │ frequency (ghost MFU list)  │   │
//! │   │  front [k,v] ◄─► [k,v] back ────┼────►│  front [k] ◄─► [k] back ──► │ drop
//! │   └─────────────────────────────────┘     └─────────────────────────────┘   │
//! │                                                                             │
//! │   pivot p ∈ [0, capacity]: recency side's target share of live capacity     │
//! │   • set() on a ghost-recency key   → p grows   (favor recency)              │
//! │   • set() on a ghost-frequency key → p shrinks (favor frequency)            │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every list is an arena-backed [`IntrusiveList`](crate::ds::IntrusiveList);
//! tables store `Copy` handles into those arenas, never references.
//!
//! ## Key States
//!
//! ```text
//!                   set (miss)                get / set
//!     Absent ─────────────────► LiveRecency ─────────────► LiveFrequency ◄─┐
//!       ▲                           │                        │   get/set   │
//!       │ trimmed / deleted         │ evicted                │ evicted  ───┘
//!       │                           ▼                        ▼
//!       ├──────────────────── GhostRecency            GhostFrequency ───┤
//!       │                           │ set                    │ set
//!       │                           └──────► LiveFrequency ◄─┘
//!       └─────────────────────────────────────────────────────────────────
//! ```
//!
//! ## Eviction Rule
//!
//! When a resident entry must make room, the victim is the back of the live
//! recency list if that list is non-empty and either `|recency| > p`, or
//! `|recency| == p` while re-admitting a ghost-frequency key. Otherwise the
//! victim is the back of the live frequency list. The victim's value is
//! dropped and its key goes to the front of the matching ghost list.
//!
//! ## Miss Path
//!
//! Before a brand-new key is admitted:
//!
//! 1. If `|live recency| + |ghost recency| == capacity`: when some of that is
//!    ghost, drop the oldest recency ghost and evict; otherwise drop the
//!    oldest live recency entry outright (it never becomes a ghost).
//! 2. Else, if all four lists together hold at least `capacity` keys: when
//!    they hold exactly `2 * capacity`, drop the oldest frequency ghost; then
//!    evict.
//!
//! This keeps `resident ≤ capacity` and `resident + ghosts ≤ 2 * capacity`.
//!
//! ## Operations
//!
//! | Operation  | Time   | Notes                                          |
//! |------------|--------|------------------------------------------------|
//! | `get`      | O(1)   | Promotes recency → frequency, refreshes order  |
//! | `set`      | O(1)   | May evict, trim ghosts, or adapt the pivot     |
//! | `delete`   | O(1)   | Live or ghost; never adapts the pivot          |
//! | `peek`     | O(1)   | No policy side effects                         |
//! | `len`      | O(1)   | Resident entries only                          |
//! | `clear`    | O(n)   | Drops everything and resets the pivot          |
//!
//! ## Example Usage
//!
//! ```
//! use arckit::policy::arc::{ArcCache, EntryState};
//!
//! let mut cache = ArcCache::new(2);
//! cache.set("a", 1);
//! cache.set("b", 2);
//!
//! // Second access promotes "a" to the frequency side.
//! assert_eq!(cache.get(&"a"), Some(&1));
//! assert_eq!(cache.state(&"a"), EntryState::LiveFrequency);
//!
//! // A third key evicts "b" (recency side is over its share of zero).
//! cache.set("c", 3);
//! assert_eq!(cache.get(&"b"), None);
//! assert_eq!(cache.state(&"b"), EntryState::GhostRecency);
//!
//! // Setting a ghost key adapts the pivot and re-admits it as frequent.
//! cache.set("b", 20);
//! assert_eq!(cache.pivot(), 1);
//! assert_eq!(cache.state(&"b"), EntryState::LiveFrequency);
//! ```
//!
//! ## Thread Safety
//!
//! [`ArcCache`] performs no locking. It is `Send`/`Sync` whenever `K` and
//! `V` are; share it behind a `Mutex` or give it a single owner.
//!
//! ## References
//!
//! - Megiddo & Modha, "ARC: A Self-Tuning, Low Overhead Replacement Cache",
//!   FAST 2003

use std::fmt;
use std::hash::Hash;
use std::mem;

use tracing::{debug, trace};

use crate::ds::segment::{Class, Entry, Handle, Segment};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::{
    ArcMetrics, ArcMetricsRecorder, ArcMetricsSnapshot, CoreMetricsRecorder, MetricsReset,
    MetricsSnapshotProvider,
};
use crate::traits::{CoreCache, MutableCache, ReadOnlyCache};

/// Where the pivot starts (and returns to on [`ArcCache::clear`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitialPivot {
    /// `p = 0`: no initial bias toward the recency side.
    #[default]
    Zero,
    /// `p = capacity / 2`: start with an even split.
    Half,
}

impl InitialPivot {
    fn resolve(self, capacity: usize) -> usize {
        match self {
            InitialPivot::Zero => 0,
            InitialPivot::Half => capacity / 2,
        }
    }
}

/// How far a ghost hit moves the pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdaptStep {
    /// `max(1, |other ghost list| / |hit ghost list|)`.
    #[default]
    Ratio,
    /// Always 1.
    Unit,
}

impl AdaptStep {
    fn delta(self, other_ghosts: usize, hit_ghosts: usize) -> usize {
        match self {
            AdaptStep::Ratio => (other_ghosts / hit_ghosts.max(1)).max(1),
            AdaptStep::Unit => 1,
        }
    }
}

/// One of the four lists an ARC cache maintains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// Resident keys seen once (T1).
    LiveRecency,
    /// Resident keys seen at least twice (T2).
    LiveFrequency,
    /// Keys evicted from the recency side, value dropped (B1).
    GhostRecency,
    /// Keys evicted from the frequency side, value dropped (B2).
    GhostFrequency,
}

impl ListKind {
    /// Every list, live before ghost, recency before frequency.
    pub const ALL: [ListKind; 4] = [
        ListKind::LiveRecency,
        ListKind::LiveFrequency,
        ListKind::GhostRecency,
        ListKind::GhostFrequency,
    ];

    /// Returns `true` for the two lists that hold values.
    pub fn is_live(self) -> bool {
        matches!(self, ListKind::LiveRecency | ListKind::LiveFrequency)
    }

    fn class(self) -> Class {
        match self {
            ListKind::LiveRecency | ListKind::GhostRecency => Class::Recency,
            ListKind::LiveFrequency | ListKind::GhostFrequency => Class::Frequency,
        }
    }
}

/// Replacement state of a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryState {
    /// Not tracked at all.
    Absent,
    /// Resident, seen once since admission.
    LiveRecency,
    /// Resident, seen at least twice or re-admitted from a ghost list.
    LiveFrequency,
    /// Remembered after eviction from the recency side.
    GhostRecency,
    /// Remembered after eviction from the frequency side.
    GhostFrequency,
}

impl EntryState {
    /// The list holding the key, if any.
    pub fn list(self) -> Option<ListKind> {
        match self {
            EntryState::Absent => None,
            EntryState::LiveRecency => Some(ListKind::LiveRecency),
            EntryState::LiveFrequency => Some(ListKind::LiveFrequency),
            EntryState::GhostRecency => Some(ListKind::GhostRecency),
            EntryState::GhostFrequency => Some(ListKind::GhostFrequency),
        }
    }
}

/// Adaptive Replacement Cache.
///
/// Holds at most `capacity` resident entries and remembers up to `capacity`
/// recently evicted keys. See the [module docs](self) for the policy.
///
/// # Type Parameters
///
/// - `K`: Key type, must be `Clone + Eq + Hash`
/// - `V`: Value type, unconstrained
///
/// # Example
///
/// ```
/// use arckit::policy::arc::ArcCache;
///
/// let mut cache = ArcCache::new(100);
/// cache.set("key1", "value1");
/// assert!(cache.contains(&"key1"));
///
/// // Update returns the previous value
/// assert_eq!(cache.set("key1", "new_value"), Some("value1"));
/// assert_eq!(cache.get(&"key1"), Some(&"new_value"));
/// ```
pub struct ArcCache<K, V> {
    live: Segment<K, V>,
    ghost: Segment<K, ()>,

    /// Target share of `capacity` for the live recency list.
    pivot: usize,
    capacity: usize,

    initial_pivot: InitialPivot,
    adapt_step: AdaptStep,

    #[cfg(feature = "metrics")]
    metrics: ArcMetrics,
}

impl<K, V> ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a cache holding at most `capacity` resident entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_new`](Self::try_new).
    ///
    /// # Example
    ///
    /// ```
    /// use arckit::policy::arc::ArcCache;
    ///
    /// let cache: ArcCache<String, i32> = ArcCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert_eq!(cache.pivot(), 0);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a cache, returning an error if `capacity` is zero.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] of kind
    /// [`InvalidCapacity`](crate::error::ConfigErrorKind::InvalidCapacity)
    /// when `capacity == 0`.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::with_options(capacity, InitialPivot::default(), AdaptStep::default())
    }

    pub(crate) fn with_options(
        capacity: usize,
        initial_pivot: InitialPivot,
        adapt_step: AdaptStep,
    ) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::invalid_capacity(capacity));
        }
        debug!(capacity, ?initial_pivot, ?adapt_step, "creating ARC cache");

        Ok(Self {
            live: Segment::with_capacity(capacity),
            ghost: Segment::with_capacity(capacity),
            pivot: initial_pivot.resolve(capacity),
            capacity,
            initial_pivot,
            adapt_step,
            #[cfg(feature = "metrics")]
            metrics: ArcMetrics::default(),
        })
    }

    /// Number of resident entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current pivot: the recency side's target share of capacity.
    #[inline]
    pub fn pivot(&self) -> usize {
        self.pivot
    }

    /// Number of ghost keys (evicted, value dropped) being remembered.
    #[inline]
    pub fn ghost_len(&self) -> usize {
        self.ghost.len()
    }

    pub fn list_len(&self, list: ListKind) -> usize {
        if list.is_live() {
            self.live.list_len(list.class())
        } else {
            self.ghost.list_len(list.class())
        }
    }

    /// Keys of one list from front (most recent) to back (next to go).
    ///
    /// ```
    /// use arckit::policy::arc::{ArcCache, ListKind};
    ///
    /// let mut cache = ArcCache::new(4);
    /// cache.set(1, ());
    /// cache.set(2, ());
    /// let keys: Vec<_> = cache.keys(ListKind::LiveRecency).copied().collect();
    /// assert_eq!(keys, vec![2, 1]);
    /// ```
    pub fn keys(&self, list: ListKind) -> Box<dyn Iterator<Item = &K> + '_> {
        if list.is_live() {
            Box::new(self.live.keys(list.class()))
        } else {
            Box::new(self.ghost.keys(list.class()))
        }
    }

    /// Returns `true` if `key` is resident. Does not touch replacement state.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.live.contains(key)
    }

    /// Which of the four lists holds `key`, if any.
    pub fn state(&self, key: &K) -> EntryState {
        if let Some(handle) = self.live.handle(key) {
            return match handle.class() {
                Class::Recency => EntryState::LiveRecency,
                Class::Frequency => EntryState::LiveFrequency,
            };
        }
        match self.ghost.handle(key).map(Handle::class) {
            Some(Class::Recency) => EntryState::GhostRecency,
            Some(Class::Frequency) => EntryState::GhostFrequency,
            None => EntryState::Absent,
        }
    }

    /// Returns the resident value without counting an access.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let handle = self.live.handle(key)?;
        self.live.get(handle).map(|entry| &entry.value)
    }

    /// Returns the resident value for `key`, recording the access.
    ///
    /// A key seen for the second time moves to the frequency side; a key
    /// already there moves to its front. Ghost keys are reported as misses
    /// and left untouched.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let Some(handle) = self.live.handle(key) else {
            #[cfg(feature = "metrics")]
            {
                self.metrics.record_get_miss();
            }
            return None;
        };

        #[cfg(feature = "metrics")]
        {
            self.metrics.record_get_hit();
        }

        let handle = self.touch(handle)?;
        self.live.get(handle).map(|entry| &entry.value)
    }

    /// Inserts or updates `key`. Returns the previous value if `key` was
    /// resident.
    ///
    /// - Resident key: value replaced in place, promoted as in [`get`](Self::get).
    /// - Ghost key: pivot adapts, room is made, key re-enters on the
    ///   frequency side.
    /// - Unknown key: ghost/resident bounds are enforced, key enters the
    ///   recency side.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_insert_call();
        }

        if let Some(handle) = self.live.handle(&key) {
            #[cfg(feature = "metrics")]
            {
                self.metrics.record_insert_update();
            }
            let touched = self.touch(handle);
            debug_assert!(touched.is_some(), "live table names a missing entry");
            let entry = self.live.get_mut(touched?);
            debug_assert!(entry.is_some(), "touched handle names an empty slot");
            return Some(mem::replace(&mut entry?.value, value));
        }

        #[cfg(feature = "metrics")]
        {
            self.metrics.record_insert_new();
        }

        match self.ghost.handle(&key) {
            Some(ghost) => self.readmit(ghost, key, value),
            None => self.admit(key, value),
        }
        None
    }

    /// Forgets `key` wherever it is. Returns the value if it was resident.
    ///
    /// Deleting is not an eviction: the key does not become a ghost and the
    /// pivot does not move.
    pub fn delete(&mut self, key: &K) -> Option<V> {
        if let Some(entry) = self.live.remove_key(key) {
            #[cfg(feature = "metrics")]
            {
                self.metrics.record_delete();
            }
            return Some(entry.value);
        }

        if self.ghost.remove_key(key).is_some() {
            #[cfg(feature = "metrics")]
            {
                self.metrics.record_delete();
            }
        }
        None
    }

    /// Drops all entries and ghosts and resets the pivot.
    pub fn clear(&mut self) {
        debug!(
            resident = self.live.len(),
            ghosts = self.ghost.len(),
            "clearing ARC cache"
        );
        self.live.clear();
        self.ghost.clear();
        self.pivot = self.initial_pivot.resolve(self.capacity);

        #[cfg(feature = "metrics")]
        {
            self.metrics.record_clear();
        }
    }

    /// Returns the counters recorded so far.
    #[cfg(feature = "metrics")]
    pub fn metrics(&self) -> &ArcMetrics {
        &self.metrics
    }

    /// Validates the structural and policy invariants. O(n).
    ///
    /// Normal operations never leave the cache in a state that fails this
    /// check; it exists for tests, fuzzing, and debugging embedders.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.live
            .check_invariants()
            .map_err(|e| InvariantError::new(format!("live segment: {}", e)))?;
        self.ghost
            .check_invariants()
            .map_err(|e| InvariantError::new(format!("ghost segment: {}", e)))?;

        let capacity = self.capacity;
        if self.live.len() > capacity {
            return Err(InvariantError::new(format!(
                "{} resident entries exceed capacity {}",
                self.live.len(),
                capacity
            )));
        }
        if self.ghost.len() > capacity {
            return Err(InvariantError::new(format!(
                "{} ghosts exceed capacity {}",
                self.ghost.len(),
                capacity
            )));
        }
        if self.pivot > capacity {
            return Err(InvariantError::new(format!(
                "pivot {} exceeds capacity {}",
                self.pivot, capacity
            )));
        }

        let recency_side =
            self.live.list_len(Class::Recency) + self.ghost.list_len(Class::Recency);
        if recency_side > capacity {
            return Err(InvariantError::new(format!(
                "recency side holds {} keys, capacity {}",
                recency_side, capacity
            )));
        }

        let tracked = self.live.len() + self.ghost.len();
        if tracked > capacity.saturating_mul(2) {
            return Err(InvariantError::new(format!(
                "{} tracked keys exceed twice the capacity {}",
                tracked, capacity
            )));
        }

        for class in [Class::Recency, Class::Frequency] {
            if self.ghost.keys(class).any(|key| self.live.contains(key)) {
                return Err(InvariantError::new(format!(
                    "a {:?} ghost is also resident",
                    class
                )));
            }
        }
        Ok(())
    }

    /// Records an access to a resident entry and returns its (new) handle.
    fn touch(&mut self, handle: Handle) -> Option<Handle> {
        match handle.class() {
            Class::Recency => {
                #[cfg(feature = "metrics")]
                {
                    self.metrics.record_promotion();
                }
                self.live.promote(handle)
            },
            Class::Frequency => self.live.move_to_front(handle).then_some(handle),
        }
    }

    /// Ghost hit: adapt the pivot toward the starved side, make room, and
    /// re-admit the key as frequent.
    fn readmit(&mut self, ghost: Handle, key: K, value: V) {
        let recency_ghosts = self.ghost.list_len(Class::Recency);
        let frequency_ghosts = self.ghost.list_len(Class::Frequency);
        let before = self.pivot;

        let prefer_frequency = match ghost.class() {
            Class::Recency => {
                let step = self.adapt_step.delta(frequency_ghosts, recency_ghosts);
                self.pivot = self.pivot.saturating_add(step).min(self.capacity);
                #[cfg(feature = "metrics")]
                {
                    self.metrics.record_recency_ghost_hit();
                    if self.pivot != before {
                        self.metrics.record_pivot_increase();
                    }
                }
                false
            },
            Class::Frequency => {
                let step = self.adapt_step.delta(recency_ghosts, frequency_ghosts);
                self.pivot = self.pivot.saturating_sub(step);
                #[cfg(feature = "metrics")]
                {
                    self.metrics.record_frequency_ghost_hit();
                    if self.pivot != before {
                        self.metrics.record_pivot_decrease();
                    }
                }
                true
            },
        };
        trace!(
            list = ?ghost.class(),
            from = before,
            to = self.pivot,
            "ghost hit adapted pivot"
        );

        self.ghost.remove(ghost);
        self.evict(prefer_frequency);
        self.live.push_front(Class::Frequency, key, value);
    }

    /// True miss: enforce the recency-side and table bounds, then admit the
    /// key on the recency side.
    fn admit(&mut self, key: K, value: V) {
        let capacity = self.capacity;
        let live_recency = self.live.list_len(Class::Recency);
        let recency_side = live_recency + self.ghost.list_len(Class::Recency);
        let tracked = self.live.len() + self.ghost.len();

        if recency_side == capacity {
            if live_recency < capacity {
                self.drop_ghost(Class::Recency);
                self.evict(false);
            } else if self.live.remove_back(Class::Recency).is_some() {
                trace!("recency side saturated by residents, dropped oldest");
                #[cfg(feature = "metrics")]
                {
                    self.metrics.record_drop();
                }
            }
        } else if recency_side < capacity && tracked >= capacity {
            if tracked == capacity.saturating_mul(2) {
                self.drop_ghost(Class::Frequency);
            }
            self.evict(false);
        }

        self.live.push_front(Class::Recency, key, value);
    }

    /// Demotes one resident entry to a ghost if the live segment is full.
    fn evict(&mut self, prefer_frequency: bool) {
        if self.live.len() < self.capacity {
            return;
        }
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_evict_call();
        }

        let recency = self.live.list_len(Class::Recency);
        let frequency = self.live.list_len(Class::Frequency);
        let victim_list = if recency > 0
            && (recency > self.pivot
                || (prefer_frequency && recency == self.pivot)
                || frequency == 0)
        {
            Class::Recency
        } else {
            Class::Frequency
        };

        let Some(Entry { key, class, .. }) = self.live.remove_back(victim_list) else {
            return;
        };
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_evicted_entry();
            match class {
                Class::Recency => self.metrics.record_recency_eviction(),
                Class::Frequency => self.metrics.record_frequency_eviction(),
            }
        }
        self.ghost.push_front(class, key, ());
    }

    fn drop_ghost(&mut self, class: Class) {
        if self.ghost.remove_back(class).is_some() {
            trace!(list = ?class, "dropped oldest ghost");
            #[cfg(feature = "metrics")]
            {
                self.metrics.record_drop();
            }
        }
    }
}

impl<K, V> fmt::Debug for ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArcCache")
            .field("capacity", &self.capacity)
            .field("pivot", &self.pivot)
            .field("live_recency", &self.live.list_len(Class::Recency))
            .field("live_frequency", &self.live.list_len(Class::Frequency))
            .field("ghost_recency", &self.ghost.list_len(Class::Recency))
            .field("ghost_frequency", &self.ghost.list_len(Class::Frequency))
            .finish()
    }
}

impl<K, V> ReadOnlyCache<K, V> for ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn contains(&self, key: &K) -> bool {
        self.live.contains(key)
    }

    fn len(&self) -> usize {
        self.live.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> CoreCache<K, V> for ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.set(key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        ArcCache::get(self, key)
    }

    fn clear(&mut self) {
        ArcCache::clear(self);
    }
}

impl<K, V> MutableCache<K, V> for ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        self.delete(key)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<ArcMetricsSnapshot> for ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> ArcMetricsSnapshot {
        ArcMetricsSnapshot::from_counters(
            &self.metrics,
            self.live.len(),
            self.ghost.len(),
            self.pivot,
            self.capacity,
        )
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsReset for ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn reset_metrics(&mut self) {
        self.metrics = ArcMetrics::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys<K: Copy + Eq + Hash, V>(cache: &ArcCache<K, V>, list: ListKind) -> Vec<K> {
        cache.keys(list).copied().collect()
    }

    #[test]
    fn arc_new_cache() {
        let cache: ArcCache<String, i32> = ArcCache::new(100);
        assert_eq!(cache.capacity(), 100);
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.ghost_len(), 0);
        assert_eq!(cache.pivot(), 0);
        for list in ListKind::ALL {
            assert_eq!(cache.list_len(list), 0);
        }
    }

    #[test]
    fn arc_try_new_rejects_zero_capacity() {
        let err = ArcCache::<u32, u32>::try_new(0).unwrap_err();
        assert_eq!(err.kind(), crate::error::ConfigErrorKind::InvalidCapacity);
    }

    #[test]
    #[should_panic(expected = "capacity must be greater than zero")]
    fn arc_new_panics_on_zero_capacity() {
        let _ = ArcCache::<u32, u32>::new(0);
    }

    #[test]
    fn arc_insert_and_get_promotes() {
        let mut cache = ArcCache::new(10);

        cache.set("key1", "value1");
        assert_eq!(cache.state(&"key1"), EntryState::LiveRecency);

        assert_eq!(cache.get(&"key1"), Some(&"value1"));
        assert_eq!(cache.state(&"key1"), EntryState::LiveFrequency);

        assert_eq!(cache.get(&"key1"), Some(&"value1"));
        assert_eq!(cache.list_len(ListKind::LiveRecency), 0);
        assert_eq!(cache.list_len(ListKind::LiveFrequency), 1);
    }

    #[test]
    fn arc_update_existing_returns_old_and_promotes() {
        let mut cache = ArcCache::new(10);
        assert_eq!(cache.set("key1", "value1"), None);

        assert_eq!(cache.set("key1", "new_value"), Some("value1"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.state(&"key1"), EntryState::LiveFrequency);
        assert_eq!(cache.peek(&"key1"), Some(&"new_value"));
    }

    #[test]
    fn arc_peek_and_contains_leave_state_alone() {
        let mut cache = ArcCache::new(4);
        cache.set(1, 'a');
        assert_eq!(cache.peek(&1), Some(&'a'));
        assert!(cache.contains(&1));
        assert_eq!(cache.state(&1), EntryState::LiveRecency);
        assert_eq!(cache.peek(&2), None);
    }

    #[test]
    fn arc_replays_six_slot_walkthrough() {
        let mut cache = ArcCache::new(6);

        cache.set(0, "0");
        assert_eq!(keys(&cache, ListKind::LiveRecency), vec![0]);

        cache.set(2, "2");
        assert_eq!(keys(&cache, ListKind::LiveRecency), vec![2, 0]);

        cache.set(0, "0");
        assert_eq!(keys(&cache, ListKind::LiveRecency), vec![2]);
        assert_eq!(keys(&cache, ListKind::LiveFrequency), vec![0]);

        assert_eq!(cache.get(&3), None);
        assert_eq!(keys(&cache, ListKind::LiveRecency), vec![2]);
        assert_eq!(keys(&cache, ListKind::LiveFrequency), vec![0]);

        cache.set(2, "2");
        assert!(keys(&cache, ListKind::LiveRecency).is_empty());
        assert_eq!(keys(&cache, ListKind::LiveFrequency), vec![2, 0]);

        for key in [10, 11, 12, 13] {
            cache.set(key, "x");
        }
        assert_eq!(cache.len(), 6);
        assert_eq!(cache.ghost_len(), 0);

        // seventh resident: the oldest recency entry becomes a ghost
        cache.set(14, "x");
        assert_eq!(cache.len(), 6);
        assert_eq!(keys(&cache, ListKind::GhostRecency), vec![10]);
        assert_eq!(keys(&cache, ListKind::LiveRecency), vec![14, 13, 12, 11]);

        // ghosts are invisible to get
        assert_eq!(cache.get(&10), None);
        assert_eq!(cache.state(&10), EntryState::GhostRecency);

        // but a set on a ghost adapts the pivot and re-admits as frequent
        cache.set(10, "10");
        assert_eq!(cache.pivot(), 1);
        assert_eq!(cache.state(&10), EntryState::LiveFrequency);
        assert_eq!(keys(&cache, ListKind::LiveFrequency), vec![10, 2, 0]);
        assert_eq!(keys(&cache, ListKind::LiveRecency), vec![14, 13, 12]);
        assert_eq!(keys(&cache, ListKind::GhostRecency), vec![11]);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_frequency_ghost_hit_lowers_pivot() {
        let mut cache = ArcCache::new(2);
        cache.set("a", 1);
        cache.get(&"a");
        cache.set("b", 2);
        cache.set("c", 3); // "b" -> ghost recency
        assert_eq!(cache.state(&"b"), EntryState::GhostRecency);

        cache.set("b", 20); // p 0 -> 1, "a" -> ghost frequency
        assert_eq!(cache.pivot(), 1);
        assert_eq!(cache.state(&"a"), EntryState::GhostFrequency);

        cache.set("a", 10); // p 1 -> 0, "c" -> ghost recency
        assert_eq!(cache.pivot(), 0);
        assert_eq!(cache.state(&"c"), EntryState::GhostRecency);
        assert_eq!(keys(&cache, ListKind::LiveFrequency), vec!["a", "b"]);
        assert_eq!(cache.get(&"a"), Some(&10));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_ratio_step_scales_with_ghost_imbalance() {
        let mut cache: ArcCache<u32, ()> =
            ArcCache::with_options(4, InitialPivot::Half, AdaptStep::Ratio).unwrap();
        for key in 0..4 {
            cache.set(key, ());
            cache.get(&key);
        }
        for key in 10..14 {
            cache.set(key, ());
        }
        assert_eq!(keys(&cache, ListKind::GhostRecency), vec![10]);
        assert_eq!(keys(&cache, ListKind::GhostFrequency), vec![2, 1, 0]);
        assert_eq!(cache.pivot(), 2);

        // step = |ghost freq| / |ghost recency| = 3, clamped to capacity
        cache.set(10, ());
        assert_eq!(cache.pivot(), 4);
        assert_eq!(keys(&cache, ListKind::GhostFrequency), vec![3, 2, 1, 0]);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_unit_step_and_half_pivot_options() {
        let mut cache: ArcCache<u32, ()> =
            ArcCache::with_options(4, InitialPivot::Half, AdaptStep::Unit).unwrap();
        assert_eq!(cache.pivot(), 2);
        for key in 0..4 {
            cache.set(key, ());
            cache.get(&key);
        }
        for key in 10..14 {
            cache.set(key, ());
        }
        let ghost = *cache.keys(ListKind::GhostRecency).next().unwrap();
        let before = cache.pivot();
        cache.set(ghost, ());
        assert_eq!(cache.pivot(), before + 1);

        cache.clear();
        assert_eq!(cache.pivot(), 2);
    }

    #[test]
    fn arc_saturated_recency_side_drops_without_ghost() {
        let mut cache = ArcCache::new(3);
        cache.set(1, "one");
        cache.set(2, "two");
        cache.set(3, "three");

        cache.set(4, "four");
        assert_eq!(cache.state(&1), EntryState::Absent);
        assert_eq!(cache.ghost_len(), 0);
        assert_eq!(keys(&cache, ListKind::LiveRecency), vec![4, 3, 2]);
    }

    #[test]
    fn arc_full_table_trims_oldest_frequency_ghost() {
        let mut cache = ArcCache::new(2);
        cache.set(1, ());
        cache.get(&1);
        cache.set(2, ());
        cache.get(&2);
        cache.set(3, ()); // 1 -> ghost frequency
        cache.set(4, ()); // 3 -> ghost recency
        assert_eq!(keys(&cache, ListKind::GhostFrequency), vec![1]);
        assert_eq!(keys(&cache, ListKind::GhostRecency), vec![3]);

        // recency side is full (1 live + 1 ghost): oldest recency ghost goes
        cache.set(5, ());
        assert_eq!(cache.state(&3), EntryState::Absent);
        assert_eq!(cache.len() + cache.ghost_len(), 4);

        cache.set(2, ()); // refresh; nothing evicted
        cache.get(&5); // 5 -> frequency; recency side shrinks
        assert_eq!(cache.list_len(ListKind::LiveRecency), 0);

        // 2N keys tracked and recency side below N: oldest frequency ghost goes
        cache.set(6, ());
        assert_eq!(cache.state(&1), EntryState::Absent);
        assert!(cache.len() + cache.ghost_len() <= 4);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_delete_live_and_ghost_without_adapting() {
        let mut cache = ArcCache::new(2);
        cache.set("a", 1);
        cache.set("b", 2);
        cache.get(&"b");
        cache.set("c", 3); // "a" -> ghost recency
        let pivot = cache.pivot();

        assert_eq!(cache.delete(&"b"), Some(2));
        assert_eq!(cache.state(&"b"), EntryState::Absent);
        assert_eq!(cache.delete(&"a"), None);
        assert_eq!(cache.state(&"a"), EntryState::Absent);
        assert_eq!(cache.delete(&"missing"), None);

        assert_eq!(cache.pivot(), pivot);
        assert_eq!(cache.ghost_len(), 0);
        assert_eq!(cache.len(), 1);

        // deleted ghost is a plain miss now
        cache.set("a", 10);
        assert_eq!(cache.state(&"a"), EntryState::LiveRecency);
        assert_eq!(cache.pivot(), pivot);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_ghost_hit_after_delete_does_not_evict() {
        let mut cache = ArcCache::new(2);
        cache.set(1, ());
        cache.set(2, ());
        cache.get(&2);
        cache.set(3, ()); // 1 -> ghost recency
        cache.delete(&3);
        assert_eq!(cache.len(), 1);

        cache.set(1, ());
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.ghost_len(), 0);
        assert_eq!(cache.state(&2), EntryState::LiveFrequency);
    }

    #[test]
    fn arc_round_trip_without_eviction() {
        let mut cache = ArcCache::new(5);
        for i in 0..5 {
            cache.set(i, i * 10);
        }
        for i in (0..5).rev() {
            assert_eq!(cache.get(&i), Some(&(i * 10)));
        }
        assert_eq!(cache.list_len(ListKind::LiveFrequency), 5);
        assert_eq!(cache.ghost_len(), 0);
    }

    #[test]
    fn arc_repeated_set_only_promotes_once() {
        let mut cache = ArcCache::new(4);
        cache.set(1, "v");
        cache.set(2, "v");
        cache.set(2, "v");
        let order = keys(&cache, ListKind::LiveFrequency);
        cache.set(2, "v");
        assert_eq!(keys(&cache, ListKind::LiveFrequency), order);
        assert_eq!(keys(&cache, ListKind::LiveRecency), vec![1]);
    }

    #[test]
    fn arc_frequent_keys_survive_a_scan() {
        let mut cache = ArcCache::new(4);
        cache.set("hot1".to_string(), 1);
        cache.set("hot2".to_string(), 2);
        cache.get(&"hot1".to_string());
        cache.get(&"hot2".to_string());

        for i in 0..100 {
            cache.set(format!("scan{}", i), i);
        }

        assert!(cache.contains(&"hot1".to_string()));
        assert!(cache.contains(&"hot2".to_string()));
        assert_eq!(cache.list_len(ListKind::LiveFrequency), 2);
        assert_eq!(cache.list_len(ListKind::GhostRecency), 2);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_capacity_one() {
        let mut cache = ArcCache::new(1);
        cache.set('a', 1);
        cache.set('b', 2);
        assert_eq!(cache.state(&'a'), EntryState::Absent);
        cache.get(&'b');
        cache.set('c', 3);
        assert_eq!(cache.state(&'b'), EntryState::GhostFrequency);
        cache.set('b', 4);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&'b'), Some(&4));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_clear_resets_everything() {
        let mut cache = ArcCache::new(2);
        cache.set(1, ());
        cache.get(&1);
        cache.set(2, ());
        cache.set(3, ());
        cache.set(2, ());
        assert_eq!(cache.pivot(), 1);
        assert_eq!(cache.ghost_len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.ghost_len(), 0);
        assert_eq!(cache.pivot(), 0);
        assert_eq!(cache.state(&1), EntryState::Absent);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_trait_surface() {
        fn exercise<C: MutableCache<u8, u8>>(cache: &mut C) {
            assert_eq!(cache.insert(1, 10), None);
            assert_eq!(cache.insert(1, 11), Some(10));
            assert_eq!(CoreCache::get(cache, &1), Some(&11));
            assert!(cache.contains(&1));
            assert_eq!(cache.remove(&1), Some(11));
            assert!(cache.is_empty());
            CoreCache::clear(cache);
        }
        let mut cache = ArcCache::new(3);
        exercise(&mut cache);
        assert_eq!(ReadOnlyCache::capacity(&cache), 3);
    }

    #[test]
    fn arc_debug_output_lists_sizes() {
        let mut cache = ArcCache::new(3);
        cache.set(1, 1);
        let dbg = format!("{:?}", cache);
        assert!(dbg.contains("ArcCache"));
        assert!(dbg.contains("live_recency: 1"));
        assert!(dbg.contains("pivot: 0"));
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn arc_metrics_track_policy_events() {
        let mut cache = ArcCache::new(2);
        cache.set("a", 1);
        cache.get(&"a");
        cache.get(&"zzz");
        cache.set("b", 2);
        cache.set("c", 3);
        cache.set("b", 20);

        let m = cache.metrics();
        assert_eq!(m.get_hits, 1);
        assert_eq!(m.get_misses, 1);
        assert_eq!(m.promotions, 1);
        assert_eq!(m.recency_ghost_hits, 1);
        assert_eq!(m.pivot_increases, 1);
        assert_eq!(m.recency_evictions, 1);
        assert_eq!(m.frequency_evictions, 1);

        let snapshot = cache.snapshot();
        assert_eq!(snapshot.pivot, 1);
        assert_eq!(snapshot.cache_len, 2);

        cache.reset_metrics();
        assert_eq!(cache.metrics(), &ArcMetrics::default());
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn arc_metrics_count_only_real_pivot_moves() {
        let mut cache = ArcCache::new(1);
        cache.set('a', 1);
        cache.get(&'a');
        cache.set('b', 2); // 'a' -> ghost frequency

        // frequency ghost hit with p already at 0: no decrease recorded
        cache.set('a', 10);
        assert_eq!(cache.pivot(), 0);
        assert_eq!(cache.metrics().frequency_ghost_hits, 1);
        assert_eq!(cache.metrics().pivot_decreases, 0);

        cache.set('b', 20); // recency ghost hit, p 0 -> 1
        cache.set('b', 21); // update
        assert_eq!(cache.pivot(), 1);

        let m = cache.metrics();
        assert_eq!(m.insert_calls, 5);
        assert_eq!(m.insert_new, 4);
        assert_eq!(m.insert_updates, 1);
        assert_eq!(m.promotions, 1);
        assert_eq!(m.recency_ghost_hits, 1);
        assert_eq!(m.pivot_increases, 1);
        assert_eq!(m.evict_calls, 3);
        assert_eq!(m.evicted_entries, 3);
        assert_eq!(m.recency_evictions, 1);
        assert_eq!(m.frequency_evictions, 2);
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn arc_metrics_count_drops_and_deletes() {
        let mut cache = ArcCache::new(2);
        for key in 1..=3 {
            cache.set(key, key);
        }
        // live recency alone filled the cache: 1 dropped outright
        assert_eq!(cache.state(&1), EntryState::Absent);
        assert_eq!(cache.metrics().drops, 1);

        cache.get(&3);
        cache.set(4, 4); // 2 -> ghost recency
        cache.set(5, 5); // oldest recency ghost trimmed, 4 -> ghost recency
        assert_eq!(cache.state(&2), EntryState::Absent);
        assert_eq!(cache.metrics().drops, 2);

        assert_eq!(cache.delete(&5), Some(5));
        assert_eq!(cache.delete(&4), None);
        assert_eq!(cache.delete(&99), None);
        let m = cache.metrics();
        assert_eq!(m.deletes, 2);
        assert_eq!(m.evict_calls, 2);
        assert_eq!(m.recency_evictions, 2);
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn arc_metrics_skip_evict_call_below_capacity() {
        let mut cache = ArcCache::new(2);
        cache.set(1, ());
        cache.set(2, ());
        cache.get(&2);
        cache.set(3, ()); // 1 -> ghost recency
        cache.delete(&3);
        assert_eq!(cache.metrics().evict_calls, 1);

        // ghost hit with a free slot: nothing is evicted or counted
        cache.set(1, ());
        assert_eq!(cache.metrics().evict_calls, 1);
        assert_eq!(cache.metrics().evicted_entries, 1);
        assert_eq!(cache.metrics().pivot_increases, 1);
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn arc_metrics_snapshot_reports_clears() {
        let mut cache = ArcCache::new(2);
        cache.set(1, ());
        cache.clear();
        cache.clear();
        assert_eq!(cache.snapshot().clears, 2);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Operation {
            Set(u16, u16),
            Get(u16),
            Delete(u16),
        }

        fn operation_strategy(keys: u16) -> impl Strategy<Value = Operation> {
            prop_oneof![
                4 => (0..keys, any::<u16>()).prop_map(|(k, v)| Operation::Set(k, v)),
                3 => (0..keys).prop_map(Operation::Get),
                1 => (0..keys).prop_map(Operation::Delete),
            ]
        }

        proptest! {
            /// Bounds and partition invariants hold after every operation.
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_arbitrary_ops_maintain_invariants(
                capacity in 1usize..24,
                ops in prop::collection::vec(operation_strategy(64), 0..300)
            ) {
                let mut cache = ArcCache::new(capacity);
                for op in ops {
                    match op {
                        Operation::Set(k, v) => { cache.set(k, v); },
                        Operation::Get(k) => { cache.get(&k); },
                        Operation::Delete(k) => { cache.delete(&k); },
                    }
                    prop_assert!(cache.check_invariants().is_ok(), "{:?}", cache.check_invariants());
                    prop_assert!(cache.len() <= capacity);
                    prop_assert!(cache.pivot() <= capacity);
                }
            }

            /// A set is always immediately readable with the stored value.
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_set_then_get_returns_value(
                capacity in 1usize..16,
                ops in prop::collection::vec((0u16..40, any::<u16>()), 1..200)
            ) {
                let mut cache = ArcCache::new(capacity);
                for (k, v) in ops {
                    cache.set(k, v);
                    prop_assert_eq!(cache.get(&k), Some(&v));
                }
            }

            /// Every key reported by a list is in exactly the matching state.
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_list_membership_matches_state(
                capacity in 1usize..12,
                ops in prop::collection::vec(operation_strategy(32), 0..150)
            ) {
                let mut cache = ArcCache::new(capacity);
                for op in ops {
                    match op {
                        Operation::Set(k, v) => { cache.set(k, v); },
                        Operation::Get(k) => { cache.get(&k); },
                        Operation::Delete(k) => { cache.delete(&k); },
                    }
                }
                let mut seen = std::collections::HashSet::new();
                for list in ListKind::ALL {
                    for key in cache.keys(list) {
                        prop_assert!(seen.insert(*key), "key {} listed twice", key);
                        prop_assert_eq!(cache.state(key).list(), Some(list));
                    }
                }
                prop_assert_eq!(seen.len(), cache.len() + cache.ghost_len());
            }
        }
    }
}
