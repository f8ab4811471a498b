use std::io::Write;
use std::sync::{Mutex, PoisonError};

use crate::metrics::snapshot::ArcMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for ARC metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// directly or forwarded to an OpenTelemetry collector. Write errors are
/// ignored; metrics never affect cache behavior.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", suffix, value);
    }

    fn write_gauge(&self, suffix: &str, value: usize) {
        self.write_metric("gauge", suffix, value as u64);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<ArcMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &ArcMetricsSnapshot) {
        self.write_counter("get_calls_total", snapshot.get_calls);
        self.write_counter("get_hits_total", snapshot.get_hits);
        self.write_counter("get_misses_total", snapshot.get_misses);
        self.write_counter("insert_calls_total", snapshot.insert_calls);
        self.write_counter("insert_updates_total", snapshot.insert_updates);
        self.write_counter("insert_new_total", snapshot.insert_new);
        self.write_counter("evict_calls_total", snapshot.evict_calls);
        self.write_counter("evicted_entries_total", snapshot.evicted_entries);
        self.write_counter("promotions_total", snapshot.promotions);
        self.write_counter("recency_ghost_hits_total", snapshot.recency_ghost_hits);
        self.write_counter("frequency_ghost_hits_total", snapshot.frequency_ghost_hits);
        self.write_counter("pivot_increases_total", snapshot.pivot_increases);
        self.write_counter("pivot_decreases_total", snapshot.pivot_decreases);
        self.write_counter("recency_evictions_total", snapshot.recency_evictions);
        self.write_counter("frequency_evictions_total", snapshot.frequency_evictions);
        self.write_counter("drops_total", snapshot.drops);
        self.write_counter("deletes_total", snapshot.deletes);
        self.write_counter("clears_total", snapshot.clears);
        self.write_gauge("cache_len", snapshot.cache_len);
        self.write_gauge("ghost_len", snapshot.ghost_len);
        self.write_gauge("pivot", snapshot.pivot);
        self.write_gauge("capacity", snapshot.capacity);
    }
}
