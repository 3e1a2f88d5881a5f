//! Train command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{apply_overrides, validate_config, PipelineConfig, TrainArgs};
use crate::train::run_training;

pub fn run_train(
    args: TrainArgs,
    mut config: PipelineConfig,
    level: LogLevel,
) -> Result<(), String> {
    apply_overrides(&mut config, &args);
    validate_config(&config).map_err(|e| format!("Validation failed: {e}"))?;

    let training = &config.training;
    log(
        level,
        LogLevel::Normal,
        &format!(
            "Training Random Forest on {}",
            config.paths.dataset_path.display()
        ),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  Trees: {}, max depth: {}, max features: {}, min samples split: {}",
            training.n_trees, training.max_depth, training.max_features, training.min_samples_split
        ),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  Test fraction: {}, seed: {}",
            training.test_fraction, training.seed
        ),
    );

    if args.dry_run {
        log(
            level,
            LogLevel::Normal,
            "Dry run - config validated successfully",
        );
        return Ok(());
    }

    let report = run_training(
        &config.paths.dataset_path,
        &config.paths.model_path,
        &training.train_config(),
    )
    .map_err(|e| format!("Training error: {e}"))?;

    log(level, LogLevel::Normal, report.to_string().trim_end());
    Ok(())
}
