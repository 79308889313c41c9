//! Flatten command handler.

use std::fs;
use std::path::Path;

use anyhow::Result;
use serde_json::{Map, Value};

use crate::error::CliError;

/// Read a JSON object from `path` and flatten it.
pub fn flatten_file(path: &Path, sep: &str) -> Result<Map<String, Value>, CliError> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    let value: Value = serde_json::from_str(&content)
        .map_err(|e| CliError::Data(format!("{}: {e}", path.display())))?;
    let Value::Object(map) = value else {
        return Err(CliError::Data(format!(
            "{}: expected a JSON object at the top level",
            path.display()
        )));
    };
    Ok(mlu_core::flatten(&map, sep))
}

/// Execute the flatten command.
pub fn execute(path: &Path, sep: &str) -> Result<()> {
    let flat = flatten_file(path, sep)?;
    println!("{}", serde_json::to_string_pretty(&flat)?);
    Ok(())
}
