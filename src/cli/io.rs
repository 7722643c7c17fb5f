//! JSON I/O handling for the CLI
//!
//! - Input: JSON files, or newline-delimited JSON (stdin in practice)
//! - Output: one JSON object per line (stdout in practice)

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read and parse a JSON file
pub fn read_json_file(path: &Path) -> CliResult<Value> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::io_error(format!("Failed to read '{}': {}", path.display(), e)))?;
    let value = serde_json::from_str(&content)?;
    Ok(value)
}

/// Non-blank lines of newline-delimited input
///
/// Lines are returned unparsed so a caller can report a malformed record
/// and keep going; only read failures surface as errors.
pub fn read_requests<R: BufRead>(reader: R) -> impl Iterator<Item = CliResult<String>> {
    reader.lines().filter_map(|line| match line {
        Ok(line) if line.trim().is_empty() => None,
        Ok(line) => Some(Ok(line)),
        Err(e) => Some(Err(CliError::from(e))),
    })
}

/// Write a success response line
pub fn write_response<W: Write>(out: &mut W, data: Value, pretty: bool) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });
    write_line(out, &response, pretty)
}

/// Write an error response line
pub fn write_error<W: Write>(out: &mut W, code: &str, message: &str, pretty: bool) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });
    write_line(out, &response, pretty)
}

fn write_line<W: Write>(out: &mut W, response: &Value, pretty: bool) -> CliResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, response)?;
    } else {
        serde_json::to_writer(&mut *out, response)?;
    }
    writeln!(out)?;
    out.flush()?;

    Ok(())
}
