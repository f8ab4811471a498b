use crate::metrics::traits::{ArcMetricsRecorder, CoreMetricsRecorder};

// ---------------------------------------------------------------------------
// ArcMetrics
// ---------------------------------------------------------------------------

/// Plain counters owned by one cache; no atomics, no locking.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArcMetrics {
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
}

impl ArcMetrics {
    /// Hits over total `get` calls, or `0.0` before the first call.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}

impl CoreMetricsRecorder for ArcMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }
    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }
    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }
    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }
    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }
    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }
    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

impl ArcMetricsRecorder for ArcMetrics {
    fn record_promotion(&mut self) {
        self.promotions += 1;
    }
    fn record_recency_ghost_hit(&mut self) {
        self.recency_ghost_hits += 1;
    }
    fn record_frequency_ghost_hit(&mut self) {
        self.frequency_ghost_hits += 1;
    }
    fn record_pivot_increase(&mut self) {
        self.pivot_increases += 1;
    }
    fn record_pivot_decrease(&mut self) {
        self.pivot_decreases += 1;
    }
    fn record_recency_eviction(&mut self) {
        self.recency_evictions += 1;
    }
    fn record_frequency_eviction(&mut self) {
        self.frequency_evictions += 1;
    }
    fn record_drop(&mut self) {
        self.drops += 1;
    }
    fn record_delete(&mut self) {
        self.deletes += 1;
    }
}
