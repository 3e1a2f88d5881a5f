//! CLI command implementations

mod decide;
mod info;
mod label;
mod train;
mod validate;

pub use decide::decide_fallback;

use crate::cli::LogLevel;
use crate::config::{load_or_default, Cli, Command, PipelineConfig};
use std::path::Path;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.quiet, cli.verbose);
    let config_path = cli.config.as_deref();

    match cli.command {
        // decide reports config problems inside its JSON
        Command::Decide(args) => decide::run_decide(args, config_path),
        Command::Label(args) => label::run_label(args, load(config_path)?, log_level),
        Command::Train(args) => train::run_train(args, load(config_path)?, log_level),
        Command::Validate(args) => validate::run_validate(args, config_path, log_level),
        Command::Info(args) => info::run_info(args, load(config_path)?, log_level),
    }
}

fn load(path: Option<&Path>) -> Result<PipelineConfig, String> {
    load_or_default(path).map_err(|e| format!("Config error: {e}"))
}
