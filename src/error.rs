//! Error types for the shardlru library.
//!
//! The only runtime error is [`ConfigError`], produced by
//! [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build)
//! when the requested configuration is invalid. A missing cache entry is a
//! normal `None` result, never an error.
//!
//! ```
//! use shardlru::builder::CacheBuilder;
//! use shardlru::error::ConfigError;
//!
//! let err: ConfigError = CacheBuilder::new(0)
//!     .try_build::<u64, String>()
//!     .unwrap_err();
//! assert!(err.to_string().contains("cache size"));
//! ```

use std::fmt;

/// Error returned when cache configuration parameters are invalid.
///
/// Carries a human-readable description of which parameter failed
/// validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_message() {
        let err = ConfigError::new("cache size must be greater than zero");
        assert_eq!(err.to_string(), "cache size must be greater than zero");
    }

    #[test]
    fn debug_includes_message() {
        let err = ConfigError::new("bad concurrency");
        assert!(format!("{:?}", err).contains("bad concurrency"));
    }

    #[test]
    fn message_accessor() {
        let err = ConfigError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
    }
}
