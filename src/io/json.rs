//! JSON reading and writing of datasets.
//!
//! Supported input: a JSON array of flat objects, `[{"a":1}, {"a":2}]`. Object keys keep their
//! document order. Values must be scalars (string, number, boolean, null).
//!
//! Output is UTF-8 with non-ASCII characters written verbatim (never `\u` escaped).

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{LoadError, LoadResult, SaveError, SaveResult};
use crate::types::{DataSet, Record, Value};

/// Options controlling how [`save_json_with`] renders a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOptions {
    /// Indent width in spaces; `None` writes compact single-line JSON.
    pub indent: Option<usize>,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self { indent: Some(2) }
    }
}

/// Read a dataset from a JSON file.
pub fn load_json_from_path(path: impl AsRef<Path>) -> LoadResult<DataSet> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| LoadError::from_io(path, e))?;
    load_json_str(&text)
}

/// Parse a dataset from an in-memory JSON string.
pub fn load_json_str(input: &str) -> LoadResult<DataSet> {
    let items = match serde_json::from_str::<serde_json::Value>(input)? {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(LoadError::NotRecords {
                message: format!("expected an array of objects, found {}", json_type(&other)),
            });
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx0, item)| convert_record(idx0 + 1, item))
        .collect::<LoadResult<Vec<_>>>()
        .map(DataSet::new)
}

fn convert_record(row: usize, item: serde_json::Value) -> LoadResult<Record> {
    let obj = match item {
        serde_json::Value::Object(obj) => obj,
        other => {
            return Err(LoadError::NotRecords {
                message: format!("row {row} is not a json object ({})", json_type(&other)),
            });
        }
    };

    let mut record = Record::with_capacity(obj.len());
    for (name, jv) in obj {
        let value = convert_json_value(row, &name, jv)?;
        record.insert(name, value);
    }
    Ok(record)
}

fn convert_json_value(row: usize, field: &str, v: serde_json::Value) -> LoadResult<Value> {
    match v {
        serde_json::Value::Null => Ok(Value::Null),
        serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
        serde_json::Value::String(s) => Ok(Value::Utf8(s)),
        serde_json::Value::Number(n) => {
            // Integers beyond i64 widen to f64, whether serde_json kept them as u64 or
            // already parsed them as floats.
            match n.as_i64() {
                Some(i) => Ok(Value::Int64(i)),
                None => n.as_f64().map(Value::Float64).ok_or_else(|| LoadError::NotRecords {
                    message: format!("row {row} field '{field}': unrepresentable number {n}"),
                }),
            }
        }
        nested @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
            Err(LoadError::NotRecords {
                message: format!(
                    "row {row} field '{field}' holds a nested {}; records must be flat",
                    json_type(&nested)
                ),
            })
        }
    }
}

/// Interpret `raw` as a JSON scalar (`23`, `2.5`, `true`, `null`, `"text"`), falling back to a
/// plain string for anything else.
pub fn parse_scalar(raw: &str) -> Value {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(v @ (serde_json::Value::Null
        | serde_json::Value::Bool(_)
        | serde_json::Value::Number(_)
        | serde_json::Value::String(_))) => {
            convert_json_value(0, "", v).unwrap_or_else(|_| Value::Utf8(raw.to_string()))
        }
        _ => Value::Utf8(raw.to_string()),
    }
}

fn json_type(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Render a dataset as a JSON array of objects.
pub fn to_json_string(dataset: &DataSet, options: &SaveOptions) -> SaveResult<String> {
    let bytes = match options.indent {
        Some(width) => {
            let indent = vec![b' '; width];
            let mut buf = Vec::new();
            let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
            dataset.serialize(&mut ser)?;
            buf
        }
        None => serde_json::to_vec(dataset)?,
    };
    // serde_json only emits valid UTF-8.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write a dataset to `path` with two-space indentation.
pub fn save_json_to_path(dataset: &DataSet, path: impl AsRef<Path>) -> SaveResult<()> {
    save_json_with(dataset, path, &SaveOptions::default())
}

/// Write a dataset to `path` using explicit [`SaveOptions`].
pub fn save_json_with(
    dataset: &DataSet,
    path: impl AsRef<Path>,
    options: &SaveOptions,
) -> SaveResult<()> {
    let path = path.as_ref();
    let text = to_json_string(dataset, options)?;
    fs::write(path, text).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), rows = dataset.row_count(), "dataset saved");
    Ok(())
}
