//! Info command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{InfoArgs, OutputFormat, PipelineConfig};
use crate::forest::ForestParams;
use crate::io::load_policy;
use crate::policy::Policy;
use serde::Serialize;

/// Summary of a persisted policy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyInfo {
    pub name: String,
    pub architecture: String,
    pub version: String,
    pub feature_names: Vec<String>,
    pub hyperparameters: ForestParams,
    pub trained_samples: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    pub n_trees: usize,
    pub max_tree_depth: usize,
    pub total_nodes: usize,
}

impl PolicyInfo {
    pub fn from_policy(policy: &Policy) -> Self {
        let meta = &policy.metadata;
        Self {
            name: meta.name.clone(),
            architecture: meta.architecture.clone(),
            version: meta.version.clone(),
            feature_names: meta.feature_names.clone(),
            hyperparameters: meta.hyperparameters,
            trained_samples: meta.trained_samples,
            accuracy: meta.accuracy,
            n_trees: policy.forest.n_trees(),
            max_tree_depth: policy.forest.max_tree_depth(),
            total_nodes: policy.forest.total_nodes(),
        }
    }

    fn to_text(&self) -> String {
        let p = &self.hyperparameters;
        let mut lines = vec![
            format!("Name: {} (v{})", self.name, self.version),
            format!("Architecture: {}", self.architecture),
            format!("Features: {}", self.feature_names.join(", ")),
            format!(
                "Trees: {} (max depth {}, {} nodes)",
                self.n_trees, self.max_tree_depth, self.total_nodes
            ),
            format!(
                "Hyperparameters: n_trees={}, max_depth={}, max_features={}, min_samples_split={}, seed={}",
                p.n_trees, p.max_depth, p.max_features, p.min_samples_split, p.seed
            ),
            format!("Trained samples: {}", self.trained_samples),
        ];
        if let Some(accuracy) = self.accuracy {
            lines.push(format!("Accuracy: {:.2}%", accuracy * 100.0));
        }
        lines.join("\n")
    }
}

pub fn run_info(args: InfoArgs, config: PipelineConfig, level: LogLevel) -> Result<(), String> {
    let path = args.model.unwrap_or(config.paths.model_path);
    let policy = load_policy(&path).map_err(|e| format!("Policy error: {e}"))?;
    let info = PolicyInfo::from_policy(&policy);

    match args.format {
        OutputFormat::Text => {
            log(
                level,
                LogLevel::Normal,
                &format!("Policy Info: {}", path.display()),
            );
            println!();
            println!("{}", info.to_text());
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&info)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&info)
                .map_err(|e| format!("YAML serialization error: {e}"))?;
            println!("{yaml}");
        }
    }

    Ok(())
}
