//! # Metrics Traits
//!
//! ```text
//!   ┌─────────────────────────────┐
//!   │     CoreMetricsRecorder     │  get hit/miss, insert, evict
//!   └──────────────┬──────────────┘
//!                  ▼
//!   ┌─────────────────────────────┐
//!   │     ArcMetricsRecorder      │  promotions, ghost hits, pivot moves,
//!   └─────────────────────────────┘  per-list evictions, drops, deletes
//!
//!   MetricsSnapshotProvider<S>   (bench/test)
//!   MetricsExporter<S>           (production monitoring)
//! ```
//!
//! Recorders only write counters; providers only read; exporters only publish.

/// Counters shared by any replacement policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// ARC-specific signals.
pub trait ArcMetricsRecorder: CoreMetricsRecorder {
    fn record_promotion(&mut self);
    fn record_recency_ghost_hit(&mut self);
    fn record_frequency_ghost_hit(&mut self);
    fn record_pivot_increase(&mut self);
    fn record_pivot_decrease(&mut self);
    fn record_recency_eviction(&mut self);
    fn record_frequency_eviction(&mut self);
    /// A key was destroyed outright (ghost trimmed, or resident dropped
    /// without becoming a ghost).
    fn record_drop(&mut self);
    fn record_delete(&mut self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset counters between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}

/// Publish a snapshot to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
