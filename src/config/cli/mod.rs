//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! irrigate label raw.csv -o dataset.csv
//! irrigate --config irrigate.yaml train --trees 200
//! irrigate decide 35 40 400
//! irrigate validate --detailed
//! irrigate info policy.json --format json
//! ```

mod core;
mod types;

pub use core::{
    apply_overrides, parse_args, Cli, Command, DecideArgs, InfoArgs, LabelArgs, TrainArgs,
    ValidateArgs,
};
pub use types::OutputFormat;
