//! # Error Types
//!
//! Top-level error type for the Belle workspace. Per-machine errors
//! (`WizardError`) live next to the machine that raises them.

use thiserror::Error;

/// Top-level error type for the Belle workspace.
#[derive(Error, Debug)]
pub enum BelleError {
    /// A tax rate was negative or not a finite number.
    #[error("invalid {name} rate: {value} (must be a finite percentage >= 0)")]
    InvalidRate {
        /// Which rate was rejected (`tps` or `tvq`).
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for BelleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_rate_message_names_the_rate() {
        let err = BelleError::InvalidRate {
            name: "tvq",
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid tvq rate: -1 (must be a finite percentage >= 0)"
        );
    }

    #[test]
    fn json_error_becomes_serialization() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: BelleError = json_err.into();
        assert!(matches!(err, BelleError::Serialization(_)));
    }
}
