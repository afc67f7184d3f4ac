//! Error taxonomy for counter operations.
//!
//! Two categories exist at this layer: validation failures, which prevent
//! any mutation, and persistence failures, which are reported after the
//! mutation already took effect. Transport and storage errors belong to the
//! external collaborators.

use thiserror::Error;

use crate::notify::NotifyError;

/// Error returned by counter operations.
#[derive(Debug, Error)]
pub enum CounterError {
    /// A supplied step or ceiling was negative. No state was mutated.
    #[error("invalid argument: {field} must be non-negative, got {value}")]
    InvalidArgument {
        /// Which field failed validation.
        field: &'static str,
        /// The rejected input.
        value: i64,
    },

    /// The notification hook failed after the mutation took effect in
    /// memory. The mutation is kept and not retried.
    #[error("persistence failure: {0}")]
    Persistence(#[from] NotifyError),
}

/// Result type for counter operations.
pub type Result<T> = std::result::Result<T, CounterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = CounterError::InvalidArgument {
            field: "ceiling",
            value: -3,
        };
        assert_eq!(
            err.to_string(),
            "invalid argument: ceiling must be non-negative, got -3"
        );
    }

    #[test]
    fn test_persistence_wraps_notify_error() {
        let err = CounterError::from(NotifyError::new("connection reset"));
        assert_eq!(err.to_string(), "persistence failure: connection reset");
    }
}
