use crate::metrics::metrics_impl::ArcMetrics;

/// Point-in-time copy of [`ArcMetrics`] plus gauges read from the cache.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ArcMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,

    pub evict_calls: u64,
    pub evicted_entries: u64,

    pub promotions: u64,
    pub recency_ghost_hits: u64,
    pub frequency_ghost_hits: u64,
    pub pivot_increases: u64,
    pub pivot_decreases: u64,
    pub recency_evictions: u64,
    pub frequency_evictions: u64,
    pub drops: u64,
    pub deletes: u64,
    pub clears: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub ghost_len: usize,
    pub pivot: usize,
    pub capacity: usize,
}

impl ArcMetricsSnapshot {
    pub(crate) fn from_counters(
        metrics: &ArcMetrics,
        cache_len: usize,
        ghost_len: usize,
        pivot: usize,
        capacity: usize,
    ) -> Self {
        Self {
            get_calls: metrics.get_calls,
            get_hits: metrics.get_hits,
            get_misses: metrics.get_misses,
            insert_calls: metrics.insert_calls,
            insert_updates: metrics.insert_updates,
            insert_new: metrics.insert_new,
            evict_calls: metrics.evict_calls,
            evicted_entries: metrics.evicted_entries,
            promotions: metrics.promotions,
            recency_ghost_hits: metrics.recency_ghost_hits,
            frequency_ghost_hits: metrics.frequency_ghost_hits,
            pivot_increases: metrics.pivot_increases,
            pivot_decreases: metrics.pivot_decreases,
            recency_evictions: metrics.recency_evictions,
            frequency_evictions: metrics.frequency_evictions,
            drops: metrics.drops,
            deletes: metrics.deletes,
            clears: metrics.clears,
            cache_len,
            ghost_len,
            pivot,
            capacity,
        }
    }

    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}
