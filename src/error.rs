// Engine errors surfaced to the route layer

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("metric source '{id}' not found")]
    NotFound { id: String },

    #[error("source '{id}' has no parameter '{key}'")]
    UnknownParameter { id: String, key: String },

    #[error("{key} must be between {min} and {max}, got {value}")]
    OutOfRange {
        key: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{key} is an on/off switch and takes 0 or 1, got {value}")]
    NotASwitch { key: String, value: f64 },

    #[error("unknown command '{0}'")]
    UnknownCommand(String),
}

impl EngineError {
    pub(crate) fn not_found(id: &str) -> Self {
        Self::NotFound { id: id.to_string() }
    }
}

/// Rejects `value` unless it lies in `[min, max]`.
pub(crate) fn check_range(key: &str, value: f64, min: f64, max: f64) -> Result<(), EngineError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(EngineError::OutOfRange {
            key: key.to_string(),
            value,
            min,
            max,
        })
    }
}
