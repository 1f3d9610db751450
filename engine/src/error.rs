//! Error handling for the sample evaluation engine

use shared::{BatchFormatError, MeasurementField};
use thiserror::Error;

use crate::wizard::WizardStep;

/// Engine error types
#[derive(Error, Debug)]
pub enum EngineError {
    // External service errors
    #[error("Prediction service unreachable: {0}")]
    ConnectionFailure(String),

    // Input errors
    #[error(transparent)]
    InvalidFormat(#[from] BatchFormatError),

    #[error("{field} out of range: {reason}")]
    OutOfRange {
        field: MeasurementField,
        reason: &'static str,
    },

    #[error("Purity is derived automatically; disable auto-calc to edit it")]
    DerivedFieldLocked,

    // Wizard errors
    #[error("Cannot {action} from step {from:?}")]
    InvalidTransition {
        from: WizardStep,
        action: &'static str,
    },

    #[error("A prediction request is already in flight")]
    RequestInFlight,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl EngineError {
    /// Message shown to the operator in the wizard's error slot
    pub fn user_message(&self) -> String {
        match self {
            EngineError::ConnectionFailure(_) => {
                "Failed to connect to the prediction service. Ensure it is running.".to_string()
            }
            EngineError::InvalidFormat(_) => "Invalid CSV format".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<config::ConfigError> for EngineError {
    fn from(e: config::ConfigError) -> Self {
        EngineError::Configuration(e.to_string())
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
