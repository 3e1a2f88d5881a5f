//! Error types for the irrigation pipeline
//!
//! Labeling and training failures are fatal and surface to the operator.
//! Model and prediction failures are caught at the inference boundary and
//! turned into a fail-safe [`Decision`](crate::infer::Decision).

use thiserror::Error;

/// Result type alias for irrigate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while labeling, training or querying a policy.
#[derive(Error, Debug)]
pub enum Error {
    /// Raw sensor table is missing columns or holds unusable values.
    #[error("Data preparation error: {0}")]
    DataPreparation(String),

    /// Labeled dataset could not be located, read or parsed.
    #[error("Training input error: {0}")]
    TrainingInput(String),

    /// Policy artifact is missing, corrupt or in an unknown format.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Reading could not be turned into a prediction.
    #[error("{0}")]
    Prediction(String),

    /// Configuration file is unreadable or invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization or deserialization of an artifact failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error belongs to the online inference path.
    ///
    /// Inference errors are never fatal: they are reported inside a
    /// decision with the pump left off.
    pub fn is_inference_error(&self) -> bool {
        matches!(self, Self::ModelUnavailable(_) | Self::Prediction(_))
    }

    /// Short error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DataPreparation(_) => "E001",
            Self::TrainingInput(_) => "E002",
            Self::ModelUnavailable(_) => "E010",
            Self::Prediction(_) => "E011",
            Self::ConfigError(_) => "E020",
            Self::Serialization(_) => "E030",
            Self::Io(_) => "E031",
        }
    }
}
