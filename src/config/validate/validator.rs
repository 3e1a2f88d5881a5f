//! Configuration validation logic

use super::error::ValidationError;
use crate::config::schema::PipelineConfig;
use crate::forest::MaxFeatures;
use crate::io::PolicyFormat;

/// Validate a pipeline configuration
///
/// Checks:
/// - Hyperparameters are in valid ranges
/// - The model path has a supported artifact extension
/// - Dataset and model do not share a path
///
/// Paths are not required to exist: `label` creates the dataset and
/// `train` the model.
pub fn validate_config(config: &PipelineConfig) -> Result<(), ValidationError> {
    let training = &config.training;

    if training.n_trees == 0 {
        return Err(ValidationError::InvalidTreeCount(training.n_trees));
    }

    if training.max_depth == 0 {
        return Err(ValidationError::InvalidMaxDepth(training.max_depth));
    }

    if let MaxFeatures::Count(0) = training.max_features {
        return Err(ValidationError::InvalidMaxFeatures(0));
    }

    if training.min_samples_split < 2 {
        return Err(ValidationError::InvalidMinSamplesSplit(
            training.min_samples_split,
        ));
    }

    // negated comparison also rejects NaN
    if !(training.test_fraction > 0.0 && training.test_fraction < 1.0) {
        return Err(ValidationError::InvalidTestFraction(training.test_fraction));
    }

    let model_path = &config.paths.model_path;
    let known_extension = model_path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(PolicyFormat::from_extension)
        .is_some();
    if !known_extension {
        return Err(ValidationError::InvalidModelPath(
            model_path.display().to_string(),
        ));
    }

    if config.paths.dataset_path == *model_path {
        return Err(ValidationError::PathCollision(
            model_path.display().to_string(),
        ));
    }

    Ok(())
}
