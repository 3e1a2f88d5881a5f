//! Declarative pipeline configuration
//!
//! - [`schema`]: YAML structure with defaults for every field
//! - [`validate_config`]: range checks before any work starts
//! - [`cli`]: command-line arguments and their overrides

pub mod cli;
mod loader;
pub mod schema;
mod validate;

pub use cli::{
    apply_overrides, parse_args, Cli, Command, DecideArgs, InfoArgs, LabelArgs, OutputFormat,
    TrainArgs, ValidateArgs,
};
pub use loader::{load_config, load_or_default};
pub use schema::{LabelingConfig, PathsConfig, PipelineConfig, TrainingParams};
pub use validate::{validate_config, ValidationError};
