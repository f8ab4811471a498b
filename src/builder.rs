//! Builder for ARC caches with non-default tuning.
//!
//! [`ArcCache::new`] covers the common case. The builder exposes the two
//! policy knobs that have more than one reasonable setting: where the pivot
//! starts ([`InitialPivot`]) and how far a ghost hit moves it ([`AdaptStep`]).
//!
//! ## Example
//!
//! ```rust
//! use arckit::builder::{AdaptStep, ArcBuilder, InitialPivot};
//!
//! let mut cache = ArcBuilder::new(100)
//!     .initial_pivot(InitialPivot::Half)
//!     .adapt_step(AdaptStep::Unit)
//!     .build::<u64, String>();
//! cache.set(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! assert_eq!(cache.pivot(), 50);
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::arc::ArcCache;
pub use crate::policy::arc::{AdaptStep, InitialPivot};

/// Builder for [`ArcCache`] instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcBuilder {
    capacity: usize,
    initial_pivot: InitialPivot,
    adapt_step: AdaptStep,
}

impl ArcBuilder {
    /// Create a new builder with the specified capacity and default tuning.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            initial_pivot: InitialPivot::default(),
            adapt_step: AdaptStep::default(),
        }
    }

    pub fn initial_pivot(mut self, initial_pivot: InitialPivot) -> Self {
        self.initial_pivot = initial_pivot;
        self
    }

    pub fn adapt_step(mut self, adapt_step: AdaptStep) -> Self {
        self.adapt_step = adapt_step;
        self
    }

    /// Build the cache.
    ///
    /// # Type Parameters
    ///
    /// - `K`: Key type, must be `Clone + Eq + Hash`
    /// - `V`: Value type, unconstrained
    ///
    /// # Panics
    ///
    /// Panics if the capacity is zero. See [`try_build`](Self::try_build).
    pub fn build<K, V>(self) -> ArcCache<K, V>
    where
        K: Clone + Eq + Hash,
    {
        match self.try_build() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Build the cache, returning an error if the capacity is zero.
    pub fn try_build<K, V>(self) -> Result<ArcCache<K, V>, ConfigError>
    where
        K: Clone + Eq + Hash,
    {
        ArcCache::with_options(self.capacity, self.initial_pivot, self.adapt_step)
    }
}
