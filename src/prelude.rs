pub use crate::builder::{AdaptStep, ArcBuilder, InitialPivot};
pub use crate::ds::{IntrusiveList, SlotArena, SlotId};
pub use crate::error::{ConfigError, ConfigErrorKind, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::{ArcMetrics, ArcMetricsSnapshot, MetricsSnapshotProvider};
pub use crate::policy::arc::{ArcCache, EntryState, ListKind};
pub use crate::traits::{CoreCache, MutableCache, ReadOnlyCache};
