//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_or_default, PipelineConfig, ValidateArgs};
use std::path::Path;

/// Format path configuration as a string
pub fn format_paths_info(config: &PipelineConfig) -> String {
    let paths = &config.paths;
    let mut lines = Vec::new();
    if let Some(raw) = &paths.raw_path {
        lines.push(format!("  Raw data: {}", raw.display()));
    }
    lines.push(format!("  Dataset: {}", paths.dataset_path.display()));
    lines.push(format!("  Model: {}", paths.model_path.display()));
    lines.join("\n")
}

/// Format labeling configuration as a string
pub fn format_labeling_info(config: &PipelineConfig) -> String {
    let columns = &config.labeling.columns;
    let show = |name: &Option<String>| name.as_deref().unwrap_or("(auto)").to_string();
    format!(
        "  Columns: temp={}, hum={}, soil={}",
        show(&columns.temp),
        show(&columns.hum),
        show(&columns.soil)
    )
}

/// Format training configuration as a string
pub fn format_training_info(config: &PipelineConfig) -> String {
    let t = &config.training;
    [
        format!("  Trees: {}", t.n_trees),
        format!("  Max depth: {}", t.max_depth),
        format!("  Max features: {}", t.max_features),
        format!("  Min samples split: {}", t.min_samples_split),
        format!("  Test fraction: {}", t.test_fraction),
        format!("  Seed: {}", t.seed),
    ]
    .join("\n")
}

/// Print detailed configuration summary
pub fn print_detailed_summary(config: &PipelineConfig) {
    println!();
    println!("Configuration Summary:");
    println!("{}", format_paths_info(config));
    println!();
    println!("{}", format_labeling_info(config));
    println!();
    println!("{}", format_training_info(config));
}

pub fn run_validate(
    args: ValidateArgs,
    config_path: Option<&Path>,
    level: LogLevel,
) -> Result<(), String> {
    match config_path {
        Some(path) => log(
            level,
            LogLevel::Normal,
            &format!("Validating config: {}", path.display()),
        ),
        None => log(
            level,
            LogLevel::Normal,
            "No config given, validating defaults",
        ),
    }

    // load_config validates as part of loading
    let config = load_or_default(config_path).map_err(|e| format!("Validation failed: {e}"))?;

    log(level, LogLevel::Normal, "Configuration is valid");

    if args.detailed && level != LogLevel::Quiet {
        print_detailed_summary(&config);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::ColumnNames;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn make_test_config() -> PipelineConfig {
        let mut config = PipelineConfig::default();
        config.paths.raw_path = Some(PathBuf::from("tomato.csv"));
        config.labeling.columns = ColumnNames {
            soil: Some("Soil moisture".into()),
            ..Default::default()
        };
        config
    }

    #[test]
    fn test_format_paths_info() {
        let info = format_paths_info(&make_test_config());
        assert!(info.contains("Raw data: tomato.csv"));
        assert!(info.contains("Dataset: dataset.csv"));
        assert!(info.contains("Model: policy.json"));
    }

    #[test]
    fn test_format_paths_info_without_raw() {
        let info = format_paths_info(&PipelineConfig::default());
        assert!(!info.contains("Raw data"));
    }

    #[test]
    fn test_format_labeling_info() {
        let info = format_labeling_info(&make_test_config());
        assert!(info.contains("temp=(auto)"));
        assert!(info.contains("soil=Soil moisture"));
    }

    #[test]
    fn test_format_training_info() {
        let info = format_training_info(&make_test_config());
        assert!(info.contains("Trees: 100"));
        assert!(info.contains("Max features: sqrt"));
        assert!(info.contains("Seed: 42"));
    }

    #[test]
    fn test_run_validate_defaults() {
        let args = ValidateArgs { detailed: false };
        assert!(run_validate(args, None, LogLevel::Quiet).is_ok());
    }

    #[test]
    fn test_run_validate_rejects_bad_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"training:\n  n_trees: 0\n").unwrap();
        let args = ValidateArgs { detailed: true };
        let err = run_validate(args, Some(file.path()), LogLevel::Quiet).unwrap_err();
        assert!(err.contains("Validation failed"));
    }
}
