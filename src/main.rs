//! Irrigate CLI
//!
//! Label, train and decide entry point for the irrigate library.
//!
//! # Usage
//!
//! ```bash
//! # Label a raw sensor export
//! irrigate label "tomato irrigation dataset.csv" -o dataset.csv
//!
//! # Train with overrides
//! irrigate train --dataset dataset.csv --model policy.json --trees 200
//!
//! # Decide for one reading (prints JSON, always exits 0)
//! irrigate decide 35 40 400
//!
//! # Validate config
//! irrigate --config irrigate.yaml validate --detailed
//!
//! # Show policy info
//! irrigate info policy.json --format yaml
//! ```

use clap::Parser;
use irrigate::cli::{decide_fallback, run_command, Cli};
use std::ffi::OsString;
use std::process::ExitCode;

fn main() -> ExitCode {
    let argv: Vec<OsString> = std::env::args_os().collect();
    let cli = match Cli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            if let Some(decision) = decide_fallback(&e, &argv) {
                println!("{decision}");
                return ExitCode::SUCCESS;
            }
            e.exit()
        }
    };

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
