//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// Missing and expired keys are not errors; both surface as `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A typed accessor found a value of a different runtime type
    #[error("Type mismatch for key '{key}': expected {expected}")]
    TypeMismatch {
        /// The key that was read
        key: String,
        /// Name of the requested type
        expected: &'static str,
    },
}

impl CacheError {
    /// Builds a type mismatch error for `key` and the requested type `T`.
    pub fn type_mismatch<T: ?Sized>(key: impl Into<String>) -> Self {
        CacheError::TypeMismatch {
            key: key.into(),
            expected: std::any::type_name::<T>(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
