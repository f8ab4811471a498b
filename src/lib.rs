//! arckit: an in-memory Adaptive Replacement Cache.
//!
//! [`ArcCache`](policy::arc::ArcCache) keeps up to `capacity` resident
//! entries split between a recency side and a frequency side, remembers
//! recently evicted keys as ghosts, and shifts capacity toward whichever side
//! those ghosts show was starved.
//!
//! ```
//! use arckit::prelude::*;
//!
//! let mut cache = ArcCache::new(3);
//! cache.set("a", 1);
//! assert_eq!(cache.get(&"a"), Some(&1));
//! assert_eq!(cache.delete(&"a"), Some(1));
//! assert!(cache.is_empty());
//! ```
//!
//! ## Modules
//!
//! - [`policy`]: the ARC policy itself
//! - [`ds`]: arena-backed lists and the segment type the policy is built on
//! - [`builder`]: tuning knobs beyond `ArcCache::new`
//! - [`traits`]: capability traits for code generic over caches
//! - `metrics` (feature `metrics`): counters, snapshots, Prometheus export

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;

#[cfg(feature = "metrics")]
pub mod metrics;
