//! Decide command implementation
//!
//! Prints exactly one JSON decision on stdout and always succeeds.

use crate::config::{load_or_default, DecideArgs};
use crate::infer::{run_inference, Decision};
use clap::error::ErrorKind;
use std::ffi::OsString;
use std::path::Path;

pub fn run_decide(args: DecideArgs, config_path: Option<&Path>) -> Result<(), String> {
    println!("{}", decide(&args, config_path).to_json());
    Ok(())
}

fn decide(args: &DecideArgs, config_path: Option<&Path>) -> Decision {
    let model_path = match &args.model {
        Some(path) => path.clone(),
        None => match load_or_default(config_path) {
            Ok(config) => config.paths.model_path,
            Err(e) => return Decision::fail_safe(e.to_string()),
        },
    };
    run_inference(&model_path, args.readings.as_slice())
}

/// JSON decision to print when `decide` arguments fail to parse.
///
/// Returns `None` for any other command, and for help or version requests,
/// so that clap can report those itself.
pub fn decide_fallback(err: &clap::Error, argv: &[OsString]) -> Option<String> {
    if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return None;
    }
    if subcommand(argv)? != "decide" {
        return None;
    }
    let rendered = err.to_string();
    let message = rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ");
    Some(Decision::fail_safe(message).to_json())
}

/// First positional token after the program name, skipping the value of
/// `-c`/`--config`.
fn subcommand(argv: &[OsString]) -> Option<&str> {
    let mut tokens = argv.iter().skip(1).filter_map(|a| a.to_str());
    while let Some(token) = tokens.next() {
        match token {
            "-c" | "--config" => {
                tokens.next();
            }
            t if t.starts_with('-') => {}
            t => return Some(t),
        }
    }
    None
}
