//! # Core Error Types
//!
//! Everything that can go wrong in the reaction core. Tracking noise
//! (unknown labels, stale marker IDs, duplicate adds) is not in here: those
//! are expected and handled in place.

use thiserror::Error;

/// Errors surfaced by the reaction core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChemarError {
    /// `trigger` was called while the reaction was not ready.
    ///
    /// The host is expected to gate its control on the readiness flag, so
    /// hitting this means the caller skipped that check.
    #[error("reaction not ready: need 1 carbon and 2 oxygen, have {carbon} carbon and {oxygen} oxygen")]
    PreconditionFailed {
        /// Carbon atoms present when the trigger was attempted.
        carbon: usize,
        /// Oxygen atoms present when the trigger was attempted.
        oxygen: usize,
    },

    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read config {path}: {reason}")]
    ConfigIo {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        reason: String,
    },

    /// Configuration file is not valid TOML for a scene config.
    #[error("failed to parse config: {0}")]
    ConfigParse(String),
}

impl From<toml::de::Error> for ChemarError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}

/// Result type for core operations.
pub type ChemarResult<T> = Result<T, ChemarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_message() {
        let err = ChemarError::PreconditionFailed {
            carbon: 2,
            oxygen: 1,
        };
        assert_eq!(
            err.to_string(),
            "reaction not ready: need 1 carbon and 2 oxygen, have 2 carbon and 1 oxygen"
        );
    }
}
