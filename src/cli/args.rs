//! CLI argument definitions using clap
//!
//! Commands:
//! - shapegen infer --sample <path>
//! - shapegen check --sample <path> [--data <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// shapegen - derive a validated struct schema from one sample
#[derive(Parser, Debug)]
#[command(name = "shapegen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the schema derived from a JSON sample
    Infer {
        /// Path to the JSON sample
        #[arg(long)]
        sample: PathBuf,

        /// Name for the top-level schema
        #[arg(long)]
        name: Option<String>,
    },

    /// Construct instances from JSON records and report each outcome
    Check {
        /// Path to the JSON sample
        #[arg(long)]
        sample: PathBuf,

        /// Name for the top-level schema
        #[arg(long)]
        name: Option<String>,

        /// JSON file holding one object or an array of objects;
        /// newline-delimited objects are read from stdin when omitted
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

impl Command {
    /// Command name used in log events
    pub fn name(&self) -> &'static str {
        match self {
            Command::Infer { .. } => "infer",
            Command::Check { .. } => "check",
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_infer() {
        let cli = Cli::try_parse_from(["shapegen", "infer", "--sample", "person.json"]).unwrap();
        match cli.command {
            Command::Infer { sample, name } => {
                assert_eq!(sample, PathBuf::from("person.json"));
                assert!(name.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_check_with_global_config() {
        let cli = Cli::try_parse_from([
            "shapegen", "check", "--sample", "s.json", "--data", "d.json", "--config", "c.json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("c.json")));
        assert_eq!(cli.command.name(), "check");
    }

    #[test]
    fn test_sample_is_required() {
        assert!(Cli::try_parse_from(["shapegen", "infer"]).is_err());
    }
}
