//! Optional ARC instrumentation (cargo feature `metrics`).
//!
//! Recording, snapshotting, and exporting are separate concerns:
//! [`ArcCache`](crate::policy::arc::ArcCache) writes into an [`ArcMetrics`]
//! through the recorder traits, a [`MetricsSnapshotProvider`] copies the
//! counters out together with gauges, and a [`MetricsExporter`] publishes a
//! snapshot.
//!
//! ```
//! use arckit::metrics::{MetricsExporter, MetricsSnapshotProvider, PrometheusTextExporter};
//! use arckit::policy::arc::ArcCache;
//!
//! let mut cache = ArcCache::new(2);
//! cache.set("a", 1);
//! cache.get(&"a");
//! cache.get(&"b");
//!
//! let snapshot = cache.snapshot();
//! assert_eq!(snapshot.get_hits, 1);
//! assert_eq!(snapshot.get_misses, 1);
//!
//! let exporter = PrometheusTextExporter::new("arc", Vec::new());
//! exporter.export(&snapshot);
//! let text = String::from_utf8(exporter.into_inner()).unwrap();
//! assert!(text.contains("arc_get_hits_total 1"));
//! ```

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::ArcMetrics;
pub use snapshot::ArcMetricsSnapshot;
pub use traits::{
    ArcMetricsRecorder, CoreMetricsRecorder, MetricsExporter, MetricsReset,
    MetricsSnapshotProvider,
};
