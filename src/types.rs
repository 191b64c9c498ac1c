//! Core data model types.
//!
//! Records are flat, ordered mappings from field name to a scalar [`Value`]. A [`DataSet`] is an
//! ordered sequence of [`Record`]s, typically loaded from a JSON array of objects by
//! [`crate::io::load_json`]. Records in one dataset are not required to share a field set.
//!
//! ## Equality
//!
//! [`Value`] and [`Number`] implement `Eq + Hash` so they can key groups and memo tables:
//!
//! - an integer equals a float when the float is integral and holds exactly that integer
//!   (`30 == 30.0`), mirroring JSON where both spell the same number
//! - booleans never equal numbers
//! - `NaN` equals `NaN`, and `-0.0` equals `0.0`

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// A numeric scalar: the subset of [`Value`] that statistics and normalization operate on.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
}

impl Number {
    /// Widen to `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    /// Numeric ordering: exact between two integers, IEEE total order otherwise.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a.cmp(b),
            _ => self.as_f64().total_cmp(&other.as_f64()),
        }
    }
}

/// Returns the integer a float holds exactly, if any.
fn exact_i64(v: f64) -> Option<i64> {
    // 2^63 is exactly representable; the range is half-open.
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    if v.fract() == 0.0 && (-BOUND..BOUND).contains(&v) {
        Some(v as i64)
    } else {
        None
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Number::Int(i), Number::Float(f)) | (Number::Float(f), Number::Int(i)) => {
                exact_i64(f) == Some(i)
            }
        }
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let as_int = match *self {
            Number::Int(v) => Some(v),
            Number::Float(v) => exact_i64(v),
        };
        match (as_int, *self) {
            (Some(v), _) => {
                0u8.hash(state);
                v.hash(state);
            }
            (None, Number::Float(v)) if v.is_nan() => 1u8.hash(state),
            (None, other) => {
                2u8.hash(state);
                other.as_f64().to_bits().hash(state);
            }
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{v}"),
            // `{:?}` keeps the trailing `.0` on integral floats.
            Number::Float(v) => write!(f, "{v:?}"),
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Number::Int(v) => serializer.serialize_i64(v),
            Number::Float(v) => serializer.serialize_f64(v),
        }
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Number::Int(v)
    }
}

impl From<i32> for Number {
    fn from(v: i32) -> Self {
        Number::Int(v.into())
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Number::Float(v)
    }
}

/// A single scalar value held by a [`Record`] field.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Explicit JSON `null`. Also what a missing field reads as under lookup-with-default.
    #[default]
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean. Never treated as numeric.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Returns the numeric view of this value; `None` for null, bool, and string values.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Int64(v) => Some(Number::Int(*v)),
            Value::Float64(v) => Some(Number::Float(*v)),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_numeric(&self) -> bool {
        self.as_number().is_some()
    }

    /// Short type label used in log lines and error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int64(_) => "int",
            Value::Float64(_) => "float",
            Value::Bool(_) => "bool",
            Value::Utf8(_) => "string",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Utf8(a), Value::Utf8(b)) => a == b,
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Null => 0u8.hash(state),
            Value::Int64(_) | Value::Float64(_) => {
                1u8.hash(state);
                if let Some(n) = self.as_number() {
                    n.hash(state);
                }
            }
            Value::Bool(v) => {
                2u8.hash(state);
                v.hash(state);
            }
            Value::Utf8(v) => {
                3u8.hash(state);
                v.hash(state);
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v:?}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Utf8(v) => f.write_str(v),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Int64(v) => serializer.serialize_i64(*v),
            Value::Float64(v) => serializer.serialize_f64(*v),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Utf8(v) => serializer.serialize_str(v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int64(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Utf8(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Utf8(v)
    }
}

impl From<Number> for Value {
    fn from(v: Number) -> Self {
        match v {
            Number::Int(v) => Value::Int64(v),
            Number::Float(v) => Value::Float64(v),
        }
    }
}

static NULL: Value = Value::Null;

/// One flat row: field names mapped to scalar values, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    /// Set a field, returning the previous value if the field was already present.
    ///
    /// Re-inserting an existing field keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    /// Look up a field; `None` if the record lacks it.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Look up a field, reading a missing field as [`Value::Null`].
    pub fn get_or_null(&self, name: &str) -> &Value {
        self.fields.get(name).unwrap_or(&NULL)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate field names in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// In-memory dataset: an ordered sequence of [`Record`]s.
///
/// Transforms never mutate a dataset; they build new ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DataSet {
    /// Records in source order.
    pub records: Vec<Record>,
}

impl DataSet {
    /// Create a dataset from records.
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Number of records in the dataset.
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Create a new dataset containing clones of the records that match `predicate`, in order.
    pub fn filter_records<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Record) -> bool,
    {
        let records = self
            .records
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect();
        Self { records }
    }

    /// Reduce (fold) all records into an accumulator value.
    ///
    /// This is similar to `Iterator::fold`, but borrows each record.
    pub fn reduce_records<A, F>(&self, init: A, mut reducer: F) -> A
    where
        F: FnMut(A, &Record) -> A,
    {
        self.records
            .iter()
            .fold(init, |acc, record| reducer(acc, record))
    }
}

impl From<Vec<Record>> for DataSet {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for DataSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DataSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
