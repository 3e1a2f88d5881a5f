//! CLI module for irrigate
//!
//! This module contains all CLI command handlers and utilities.

mod commands;
mod logging;

pub use commands::{decide_fallback, run_command};
pub use logging::LogLevel;

// Re-export Cli from config for convenience
pub use crate::config::Cli;
