//! Configuration file structure
//!
//! ```json
//! { "log_level": "info", "pretty": true }
//! ```
//!
//! Every field is optional. Without a config file the defaults apply.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::errors::{CliError, CliResult};
use crate::observability::Severity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Minimum log severity (optional, default "warn")
    #[serde(
        default = "default_log_level",
        deserialize_with = "deserialize_severity",
        serialize_with = "serialize_severity"
    )]
    pub log_level: Severity,

    /// Pretty-print responses (optional, default false)
    #[serde(default)]
    pub pretty: bool,
}

fn default_log_level() -> Severity {
    Severity::Warn
}

fn deserialize_severity<'de, D>(deserializer: D) -> Result<Severity, D::Error>
where
    D: Deserializer<'de>,
{
    let level = String::deserialize(deserializer)?;
    level
        .parse()
        .map_err(|e: String| serde::de::Error::custom(format!("invalid log_level: {}", e)))
}

fn serialize_severity<S>(severity: &Severity, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&severity.as_str().to_ascii_lowercase())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            pretty: false,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
