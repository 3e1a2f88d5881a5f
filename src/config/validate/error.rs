//! Validation error types

/// Validation error type
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid number of trees: {0} (must be > 0)")]
    InvalidTreeCount(usize),

    #[error("Invalid max depth: {0} (must be > 0)")]
    InvalidMaxDepth(usize),

    #[error("Invalid max features: {0} (must be > 0)")]
    InvalidMaxFeatures(usize),

    #[error("Invalid min samples split: {0} (must be >= 2)")]
    InvalidMinSamplesSplit(usize),

    #[error("Invalid test fraction: {0} (must be > 0.0 and < 1.0)")]
    InvalidTestFraction(f64),

    #[error("Invalid model path: {0} (extension must be json, yaml or yml)")]
    InvalidModelPath(String),

    #[error("Dataset and model paths must differ: {0}")]
    PathCollision(String),
}
