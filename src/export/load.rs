use crate::error::NormalizeError;
use crate::export::record::{NAME_FIELD, Record};
use serde_yaml::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read and parse a classification export into records, in file order.
///
/// YAML is the native format; a JSON export parses as YAML as well.
pub fn parse_export_file(path: &Path) -> Result<Vec<Record>, NormalizeError> {
    let text = fs::read_to_string(path).map_err(|e| NormalizeError::io(path, e))?;
    debug!(path = %path.display(), bytes = text.len(), "read export");

    let doc: Value = serde_yaml::from_str(&text).map_err(|e| {
        NormalizeError::InputFormat(format!("cannot parse {}: {}", path.display(), e))
    })?;

    records_from_value(doc)
}

/// Split a parsed export document into records.
///
/// The document must be a mapping whose values are mappings, each with a
/// string (or numeric) `name` field. The `name` field is removed from the
/// attributes; all other fields are kept in their original order.
pub fn records_from_value(doc: Value) -> Result<Vec<Record>, NormalizeError> {
    let entries = match doc {
        Value::Mapping(m) => m,
        other => {
            return Err(NormalizeError::InputFormat(format!(
                "export root must be a mapping, found {}",
                kind(&other)
            )));
        }
    };

    let mut out = Vec::with_capacity(entries.len());
    for (key, details) in entries {
        let label = display_key(&key);
        let mut attributes = match details {
            Value::Mapping(m) => m,
            other => {
                return Err(NormalizeError::InputFormat(format!(
                    "record {} must be a mapping, found {}",
                    label,
                    kind(&other)
                )));
            }
        };

        let name = match attributes.shift_remove(NAME_FIELD) {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => {
                return Err(NormalizeError::InputFormat(format!(
                    "record {} has a non-scalar `{}` field ({})",
                    label,
                    NAME_FIELD,
                    kind(&other)
                )));
            }
            None => {
                return Err(NormalizeError::InputFormat(format!(
                    "record {} has no `{}` field",
                    label, NAME_FIELD
                )));
            }
        };

        out.push(Record::new(name, attributes));
    }

    Ok(out)
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn display_key(key: &Value) -> String {
    match key {
        Value::String(s) => format!("{:?}", s),
        Value::Number(n) => n.to_string(),
        other => format!("<{}>", kind(other)),
    }
}
