//! Core CLI types - Cli, Command, and argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;
use crate::config::PipelineConfig;
use crate::forest::MaxFeatures;

/// Irrigate: sensor-driven irrigation pump decisions
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "irrigate")]
#[command(version)]
#[command(about = "Label sensor data, train a pump policy and decide from live readings")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Pipeline configuration file (YAML); defaults apply without one
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Label a raw sensor export with the pump rule
    Label(LabelArgs),

    /// Train and persist a policy from a labeled dataset
    Train(TrainArgs),

    /// Decide the pump action for one reading (prints JSON)
    Decide(DecideArgs),

    /// Validate the configuration without running anything
    Validate(ValidateArgs),

    /// Describe a persisted policy
    Info(InfoArgs),
}

/// Arguments for the label command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct LabelArgs {
    /// Raw sensor CSV (overrides `paths.raw_path`)
    #[arg(value_name = "RAW")]
    pub raw: Option<PathBuf>,

    /// Labeled dataset to write (overrides `paths.dataset_path`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the train command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct TrainArgs {
    /// Override the labeled dataset path
    #[arg(short, long)]
    pub dataset: Option<PathBuf>,

    /// Override the policy output path
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Override number of trees
    #[arg(short, long)]
    pub trees: Option<usize>,

    /// Override maximum tree depth
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Override features per split (sqrt, all or a count)
    #[arg(long)]
    pub max_features: Option<MaxFeatures>,

    /// Override the held-out evaluation fraction
    #[arg(long)]
    pub test_fraction: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Dry run (validate config but don't train)
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the decide command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct DecideArgs {
    /// Override the policy path
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Readings in order: TEMP HUMID SOIL
    ///
    /// Kept as text so that bad values become an error decision rather
    /// than a usage error.
    #[arg(value_name = "READING", num_args = 0.., allow_negative_numbers = true)]
    pub readings: Vec<String>,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Show detailed validation report
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    /// Policy artifact (defaults to `paths.model_path`)
    #[arg(value_name = "MODEL")]
    pub model: Option<PathBuf>,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to a PipelineConfig
pub fn apply_overrides(config: &mut PipelineConfig, args: &TrainArgs) {
    if let Some(dataset) = &args.dataset {
        config.paths.dataset_path = dataset.clone();
    }
    if let Some(model) = &args.model {
        config.paths.model_path = model.clone();
    }
    if let Some(trees) = args.trees {
        config.training.n_trees = trees;
    }
    if let Some(max_depth) = args.max_depth {
        config.training.max_depth = max_depth;
    }
    if let Some(max_features) = args.max_features {
        config.training.max_features = max_features;
    }
    if let Some(test_fraction) = args.test_fraction {
        config.training.test_fraction = test_fraction;
    }
    if let Some(seed) = args.seed {
        config.training.seed = seed;
    }
}
