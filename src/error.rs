//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// Only `InvalidConfiguration` is a real failure. `NotFound` and `Expired`
/// both mean "no value available" and are ordinary lookup outcomes; they stay
/// distinct so callers can tell a purged TTL apart from a key never stored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Construction parameters are unusable (e.g. zero capacity)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Key was never set, was deleted, or was evicted
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Key existed but its TTL elapsed
    #[error("Key expired: {0}")]
    Expired(String),
}

impl CacheError {
    /// Returns true for the two "no value available" outcomes.
    pub fn is_absent(&self) -> bool {
        matches!(self, CacheError::NotFound(_) | CacheError::Expired(_))
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CacheError::NotFound("\"k\"".to_string()).to_string(),
            "Key not found: \"k\""
        );
        assert_eq!(
            CacheError::Expired("\"k\"".to_string()).to_string(),
            "Key expired: \"k\""
        );
        assert!(CacheError::InvalidConfiguration("capacity must be greater than 0".into())
            .to_string()
            .starts_with("Invalid configuration"));
    }

    #[test]
    fn test_is_absent() {
        assert!(CacheError::NotFound("a".into()).is_absent());
        assert!(CacheError::Expired("a".into()).is_absent());
        assert!(!CacheError::InvalidConfiguration("a".into()).is_absent());
    }
}
