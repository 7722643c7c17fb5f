//! CLI command implementations
//!
//! Both commands derive a schema from the sample file first. `infer` prints
//! it; `check` then constructs one instance per record and prints one
//! response line per record. A record that fails validation, is not a
//! mapping, or is not valid JSON produces an error line and does not stop
//! the run. Failing to read the input at all does.

use std::io::{self, BufRead, Write};
use std::path::Path;

use serde_json::json;

use crate::observability::{log_event_with_fields, Event, Logger};
use crate::schema::{generate_with, Generated, Schema, SchemaBuilder};
use crate::value::Value;

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_json_file, read_requests, write_error, write_response};

/// Parse arguments and run
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli)
}

/// Run the appropriate command based on CLI args, writing to stdout
pub fn run_command(cli: Cli) -> CliResult<()> {
    run_command_with(cli, &mut io::stdout().lock())
}

/// Run the appropriate command, writing response lines to `out`
pub fn run_command_with<W: Write>(cli: Cli, out: &mut W) -> CliResult<()> {
    let config = Config::load_or_default(cli.config.as_deref())?;
    Logger::set_min_severity(config.log_level);
    if let Some(path) = &cli.config {
        let path = path.display().to_string();
        log_event_with_fields(Event::ConfigLoaded, &[("path", path.as_str())]);
    }

    let command_name = cli.command.name();
    let result = match cli.command {
        Command::Infer { sample, name } => infer(&config, &sample, name, out),
        Command::Check { sample, name, data } => {
            check(&config, &sample, name, data.as_deref(), out)
        }
    };

    match &result {
        Ok(()) => log_event_with_fields(Event::CommandComplete, &[("command", command_name)]),
        Err(e) => log_event_with_fields(
            Event::CommandFailed,
            &[("command", command_name), ("code", e.code_str())],
        ),
    }

    result
}

/// Print the schema derived from `sample_path`
///
/// A sample that is not a JSON object is echoed back as a pass-through.
pub fn infer<W: Write>(
    config: &Config,
    sample_path: &Path,
    name: Option<String>,
    out: &mut W,
) -> CliResult<()> {
    let data = match generate_from_file(sample_path, name)? {
        Generated::Schema(schema) => json!({ "schema": schema.describe() }),
        Generated::PassThrough(value) => json!({ "passthrough": value.to_json() }),
    };
    write_response(out, data, config.pretty)
}

/// Construct an instance for every record and report each outcome
///
/// Records come from `data_path`, or from newline-delimited stdin when it
/// is `None`.
pub fn check<W: Write>(
    config: &Config,
    sample_path: &Path,
    name: Option<String>,
    data_path: Option<&Path>,
    out: &mut W,
) -> CliResult<()> {
    let schema = match generate_from_file(sample_path, name)? {
        Generated::Schema(schema) => schema,
        Generated::PassThrough(value) => {
            return Err(CliError::not_a_mapping(format!(
                "sample '{}' is a {}, not a mapping",
                sample_path.display(),
                value.kind()
            )));
        }
    };

    match data_path {
        Some(path) => {
            for record in records_from_file(path)? {
                check_record(config, &schema, record, out)?;
            }
            Ok(())
        }
        None => check_stream(config, &schema, io::stdin().lock(), out),
    }
}

fn generate_from_file(sample_path: &Path, name: Option<String>) -> CliResult<Generated> {
    let sample = read_json_file(sample_path)?;
    let builder = match name {
        Some(name) => SchemaBuilder::new().named(name),
        None => SchemaBuilder::new(),
    };
    Ok(generate_with(&builder, Value::from(sample)))
}

/// A data file holds a single object or an array of objects
fn records_from_file(path: &Path) -> CliResult<Vec<serde_json::Value>> {
    match read_json_file(path)? {
        serde_json::Value::Array(records) => Ok(records),
        record => Ok(vec![record]),
    }
}

/// One record per line; a malformed line is reported and skipped
fn check_stream<R: BufRead, W: Write>(
    config: &Config,
    schema: &Schema,
    input: R,
    out: &mut W,
) -> CliResult<()> {
    for line in read_requests(input) {
        match serde_json::from_str(&line?) {
            Ok(record) => check_record(config, schema, record, out)?,
            Err(e) => {
                let err = CliError::from(e);
                write_error(out, err.code_str(), err.message(), config.pretty)?;
            }
        }
    }
    Ok(())
}

fn check_record<W: Write>(
    config: &Config,
    schema: &Schema,
    record: serde_json::Value,
    out: &mut W,
) -> CliResult<()> {
    match Value::from(record) {
        Value::Map(initial) => match schema.construct(initial) {
            Ok(instance) => write_response(out, Value::from(instance).to_json(), config.pretty),
            Err(e) => write_error(out, e.code(), &e.to_string(), config.pretty),
        },
        other => {
            let err = CliError::not_a_mapping(format!("record is a {}, not a mapping", other.kind()));
            write_error(out, err.code_str(), err.message(), config.pretty)
        }
    }
}
