//! TOML document loading and flattening.
//!
//! A document is parsed as a whole before anything is written, then its
//! tree is flattened into `(flat key, text)` pairs. The flat key is the
//! table path joined with `-`, with every `_` also turned into `-`, so
//! `[section] name` and a root `section_name` both address `section-name`.

use serde::Serialize;
use toml::{Table, Value};

use crate::config::ConfigError;
use crate::constants::{KEY_SEPARATOR, KEY_SEPARATOR_ALIAS, LIST_SEPARATOR};

/// One leaf of a flattened document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatEntry {
    pub key: String,
    pub value: String,
}

/// Parse a document. Empty input is an empty table, not an error.
pub fn parse_document(bytes: &[u8]) -> Result<Table, ConfigError> {
    let text = std::str::from_utf8(bytes).map_err(|source| ConfigError::InvalidUtf8 { source })?;
    if text.trim().is_empty() {
        return Ok(Table::new());
    }
    text.parse::<Table>()
        .map_err(|source| ConfigError::ParseDocument { source })
}

/// Parse and flatten in one step.
pub fn load_document(bytes: &[u8]) -> Result<Vec<FlatEntry>, ConfigError> {
    flatten(&parse_document(bytes)?)
}

/// Flatten a table into leaf entries.
///
/// Arrays of scalars become one comma-joined string. Arrays holding tables
/// or other arrays are rejected rather than mis-flattened.
pub fn flatten(table: &Table) -> Result<Vec<FlatEntry>, ConfigError> {
    let mut entries = Vec::new();
    flatten_into(table, &mut Vec::new(), &mut entries)?;
    Ok(entries)
}

fn flatten_into<'a>(
    table: &'a Table,
    path: &mut Vec<&'a str>,
    out: &mut Vec<FlatEntry>,
) -> Result<(), ConfigError> {
    for (key, value) in table {
        path.push(key);
        match value {
            Value::Table(sub) => flatten_into(sub, path, out)?,
            Value::Array(items) => {
                let key = flat_key(path);
                let value = join_array(&key, items)?;
                out.push(FlatEntry { key, value });
            }
            scalar => out.push(FlatEntry {
                key: flat_key(path),
                value: scalar_text(scalar),
            }),
        }
        path.pop();
    }
    Ok(())
}

/// Join path segments into a registry name.
pub fn flat_key<S: AsRef<str>>(segments: &[S]) -> String {
    let mut key = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            key.push(KEY_SEPARATOR);
        }
        key.push_str(segment.as_ref());
    }
    key.replace(KEY_SEPARATOR_ALIAS, &KEY_SEPARATOR.to_string())
}

fn join_array(key: &str, items: &[Value]) -> Result<String, ConfigError> {
    let mut parts = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Table(_) => return Err(unsupported(key, "array of tables")),
            Value::Array(_) => return Err(unsupported(key, "nested array")),
            scalar => parts.push(scalar_text(scalar)),
        }
    }
    Ok(parts.join(&LIST_SEPARATOR.to_string()))
}

fn unsupported(key: &str, found: &'static str) -> ConfigError {
    ConfigError::UnsupportedValue {
        key: key.to_string(),
        found,
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Datetime(dt) => dt.to_string(),
        Value::Array(_) | Value::Table(_) => value.to_string(),
    }
}
