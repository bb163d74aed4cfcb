//! CLI module for the hotel API
//!
//! Provides command-line interface for:
//! - init: Write a default config and create the data directory
//! - serve: Boot the store and serve HTTP until interrupted

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{apply_overrides, init, open_store, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
