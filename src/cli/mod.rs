//! CLI module for shapegen
//!
//! Provides command-line interface for:
//! - infer: derive and print a schema from a JSON sample
//! - check: validate JSON records against the derived schema

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, infer, run, run_command, run_command_with};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_json_file, read_requests, write_error, write_response};
