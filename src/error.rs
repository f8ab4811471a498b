//! Error types for arckit.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: returned when a cache cannot be constructed from the
//!   requested parameters. The only kind today is
//!   [`ConfigErrorKind::InvalidCapacity`] (capacity of zero).
//! - [`InvariantError`]: returned by `check_invariants` methods when internal
//!   bookkeeping is inconsistent. Normal cache operations never produce it.
//!
//! ## Example Usage
//!
//! ```
//! use arckit::error::{ConfigError, ConfigErrorKind};
//! use arckit::policy::arc::ArcCache;
//!
//! let cache: Result<ArcCache<String, i32>, ConfigError> = ArcCache::try_new(100);
//! assert!(cache.is_ok());
//!
//! let err = ArcCache::<String, i32>::try_new(0).unwrap_err();
//! assert_eq!(err.kind(), ConfigErrorKind::InvalidCapacity);
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by [`ArcCache::check_invariants`](crate::policy::arc::ArcCache::check_invariants)
/// and the data-structure checks it delegates to. Carries a human-readable
/// description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Classifies a [`ConfigError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ConfigErrorKind {
    /// Capacity was not a positive integer.
    InvalidCapacity,
}

/// Error returned when cache configuration parameters are invalid.
///
/// Construction-time only: once a cache exists, none of its operations can
/// fail. Callers should treat this as a programming or configuration error.
///
/// # Example
///
/// ```
/// use arckit::builder::ArcBuilder;
///
/// let err = ArcBuilder::new(0).try_build::<u64, u64>().unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    kind: ConfigErrorKind,
    message: String,
}

impl ConfigError {
    #[inline]
    pub fn new(kind: ConfigErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            message: msg.into(),
        }
    }

    /// The error raised for a capacity of zero.
    pub fn invalid_capacity(capacity: usize) -> Self {
        Self::new(
            ConfigErrorKind::InvalidCapacity,
            format!("cache capacity must be greater than zero, got {}", capacity),
        )
    }

    #[inline]
    pub fn kind(&self) -> ConfigErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
