//! YAML schema for pipeline configuration

use crate::forest::{ForestParams, MaxFeatures};
use crate::label::ColumnNames;
use crate::train::TrainConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete pipeline configuration
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Dataset and artifact locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Raw column selection
    #[serde(default)]
    pub labeling: LabelingConfig,

    /// Forest hyperparameters and evaluation split
    #[serde(default)]
    pub training: TrainingParams,
}

/// File locations used by the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Raw sensor export read by `label`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_path: Option<PathBuf>,

    /// Labeled dataset written by `label` and read by `train`
    pub dataset_path: PathBuf,

    /// Policy artifact written by `train` and read by `decide`
    pub model_path: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_path: None,
            dataset_path: PathBuf::from("dataset.csv"),
            model_path: PathBuf::from("policy.json"),
        }
    }
}

/// Labeling configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelingConfig {
    /// Explicit raw column names; unset columns are detected from aliases
    #[serde(default)]
    pub columns: ColumnNames,
}

/// Training hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingParams {
    /// Number of trees
    pub n_trees: usize,

    /// Maximum tree depth
    pub max_depth: usize,

    /// Features examined per split (`sqrt`, `all` or a count)
    pub max_features: MaxFeatures,

    /// Minimum samples needed to split a node
    pub min_samples_split: usize,

    /// Share of samples held out for evaluation
    pub test_fraction: f64,

    /// Seed for the split, bootstrap and feature sampling
    pub seed: u64,
}

impl Default for TrainingParams {
    fn default() -> Self {
        let forest = ForestParams::default();
        Self {
            n_trees: forest.n_trees,
            max_depth: forest.max_depth,
            max_features: forest.max_features,
            min_samples_split: forest.min_samples_split,
            test_fraction: TrainConfig::default().test_fraction,
            seed: forest.seed,
        }
    }
}

impl TrainingParams {
    pub fn forest_params(&self) -> ForestParams {
        ForestParams {
            n_trees: self.n_trees,
            max_depth: self.max_depth,
            max_features: self.max_features,
            min_samples_split: self.min_samples_split,
            seed: self.seed,
        }
    }

    pub fn train_config(&self) -> TrainConfig {
        TrainConfig {
            params: self.forest_params(),
            test_fraction: self.test_fraction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config: PipelineConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.paths.model_path, PathBuf::from("policy.json"));
        assert_eq!(config.training.n_trees, 100);
        assert_eq!(config.training.max_depth, 10);
        assert_eq!(config.training.seed, 42);
        assert_eq!(config.training.test_fraction, 0.2);
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
paths:
  raw_path: data/tomato.csv
  dataset_path: data/dataset.csv
  model_path: models/policy.yaml
labeling:
  columns:
    temp: "Temperature [_ C]"
    soil: "Soil moisture"
training:
  n_trees: 50
  max_features: all
  seed: 7
"#;
        let config: PipelineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.paths.raw_path, Some(PathBuf::from("data/tomato.csv")));
        assert_eq!(config.labeling.columns.temp.as_deref(), Some("Temperature [_ C]"));
        assert!(config.labeling.columns.hum.is_none());
        assert_eq!(config.training.n_trees, 50);
        assert_eq!(config.training.max_features, MaxFeatures::All);
        // untouched fields keep defaults
        assert_eq!(config.training.max_depth, 10);
        assert_eq!(config.training.seed, 7);
    }

    #[test]
    fn test_train_config_conversion() {
        let params = TrainingParams {
            n_trees: 5,
            test_fraction: 0.25,
            ..TrainingParams::default()
        };
        let config = params.train_config();
        assert_eq!(config.params.n_trees, 5);
        assert_eq!(config.params.max_features, MaxFeatures::Sqrt);
        assert_eq!(config.test_fraction, 0.25);
    }

    #[test]
    fn test_serialize_round_trip() {
        let config = PipelineConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("model_path: policy.json"));
        assert!(!yaml.contains("raw_path"));
        let back: PipelineConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, config);
    }
}
