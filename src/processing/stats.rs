//! Column statistics for [`crate::types::DataSet`].

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::error::{TransformError, TransformResult};
use crate::instrument::timed;
use crate::types::{DataSet, Number};

/// Summary statistics of one numeric column.
///
/// `min` and `max` keep the numeric type they had in the dataset; `mean` is always a float.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnStats {
    pub min: Number,
    pub max: Number,
    pub mean: f64,
}

impl fmt::Display for ColumnStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{min: {}, max: {}, mean: {:?}}}", self.min, self.max, self.mean)
    }
}

#[derive(Default)]
struct Accumulator {
    count: usize,
    sum: f64,
    min: Option<Number>,
    max: Option<Number>,
}

impl Accumulator {
    fn add(mut self, v: Number) -> Self {
        self.count += 1;
        self.sum += v.as_f64();
        // Strict comparisons: the first of several equal values wins.
        if self.min.is_none_or(|m| v.total_cmp(&m) == Ordering::Less) {
            self.min = Some(v);
        }
        if self.max.is_none_or(|m| v.total_cmp(&m) == Ordering::Greater) {
            self.max = Some(v);
        }
        self
    }

    fn finish(self) -> Option<ColumnStats> {
        match (self.min, self.max) {
            (Some(min), Some(max)) => {
                // Rounding in the running sum can push the mean just past an extreme.
                // `max`/`min` rather than `clamp`, which panics on a NaN bound.
                let mean = (self.sum / self.count as f64)
                    .max(min.as_f64())
                    .min(max.as_f64());
                Some(ColumnStats { min, max, mean })
            }
            _ => None,
        }
    }
}

/// Compute min, max, and mean of the numeric values stored under `field`.
///
/// Records that lack the field, or hold a null, boolean, or string there, are skipped.
/// Booleans are never counted as numbers.
///
/// # Errors
///
/// Returns [`TransformError::EmptySelection`] naming `field` if no record holds a numeric value
/// for it.
///
/// # Example
///
/// ```rust
/// use record_utils::processing::column_stats;
/// use record_utils::types::{DataSet, Number, Record};
///
/// let ds: DataSet = [23, 24, 67]
///     .into_iter()
///     .map(|age| Record::from([("age", age)]))
///     .collect();
///
/// let stats = column_stats(&ds, "age").unwrap();
/// assert_eq!(stats.min, Number::Int(23));
/// assert_eq!(stats.max, Number::Int(67));
/// assert_eq!(stats.mean, 38.0);
/// ```
pub fn column_stats(dataset: &DataSet, field: &str) -> TransformResult<ColumnStats> {
    timed("column_stats", || -> TransformResult<ColumnStats> {
        tracing::info!("Calculating statistics for key: {field} ...");

        let stats = dataset
            .reduce_records(Accumulator::default(), |acc, record| {
                match record.get(field).and_then(|v| v.as_number()) {
                    Some(n) => acc.add(n),
                    None => acc,
                }
            })
            .finish()
            .ok_or_else(|| TransformError::EmptySelection {
                field: field.to_string(),
            })?;

        tracing::debug!("Statistics for key {field} were successfully calculated, stats: {stats}");
        Ok(stats)
    })
}

#[cfg(test)]
mod tests {
    use super::column_stats;
    use crate::error::TransformError;
    use crate::types::{DataSet, Number, Record, Value};

    fn ages(values: Vec<Value>) -> DataSet {
        values
            .into_iter()
            .map(|v| Record::from([("age", v)]))
            .collect()
    }

    #[test]
    fn stats_over_integer_column_keep_integer_min_max() {
        let ds = ages(vec![23.into(), 24.into(), 67.into(), 43.into(), 18.into()]);
        let stats = column_stats(&ds, "age").unwrap();
        assert!(matches!(stats.min, Number::Int(18)));
        assert!(matches!(stats.max, Number::Int(67)));
        assert_eq!(stats.mean, 35.0);
    }

    #[test]
    fn stats_skip_missing_null_string_and_bool_values() {
        let mut ds = ages(vec![
            10.into(),
            Value::Null,
            "40".into(),
            true.into(),
            20.into(),
        ]);
        ds.records.push(Record::from([("name", "no age")]));

        let stats = column_stats(&ds, "age").unwrap();
        assert_eq!(stats.min, Number::Int(10));
        assert_eq!(stats.max, Number::Int(20));
        assert_eq!(stats.mean, 15.0);
    }

    #[test]
    fn stats_over_mixed_ints_and_floats() {
        let ds = ages(vec![2.into(), 0.5.into(), 3.5.into()]);
        let stats = column_stats(&ds, "age").unwrap();
        assert!(matches!(stats.min, Number::Float(v) if v == 0.5));
        assert!(matches!(stats.max, Number::Float(v) if v == 3.5));
        assert_eq!(stats.mean, 2.0);
    }

    #[test]
    fn mean_of_repeated_value_stays_within_extremes() {
        let ds = ages(vec![0.1.into(), 0.1.into(), 0.1.into()]);
        let stats = column_stats(&ds, "age").unwrap();
        assert_eq!(stats.mean, 0.1);
        assert!(stats.min.as_f64() <= stats.mean && stats.mean <= stats.max.as_f64());

        let ds = ages(vec![0.1.into(), 0.2.into(), 0.7.into(), 0.1.into()]);
        let stats = column_stats(&ds, "age").unwrap();
        assert!(stats.min.as_f64() <= stats.mean && stats.mean <= stats.max.as_f64());
    }

    #[test]
    fn stats_keep_first_of_equal_extremes() {
        let ds = ages(vec![5.0.into(), 5.into(), 1.into(), 1.0.into()]);
        let stats = column_stats(&ds, "age").unwrap();
        assert!(matches!(stats.max, Number::Float(_)));
        assert!(matches!(stats.min, Number::Int(1)));
    }

    #[test]
    fn stats_fail_on_empty_selection_with_field_name() {
        let ds = ages(vec!["a".into(), "b".into(), false.into()]);
        let err = column_stats(&ds, "age").unwrap_err();
        assert_eq!(
            err,
            TransformError::EmptySelection {
                field: "age".to_string()
            }
        );
        assert!(err.to_string().contains("'age'"));

        let empty = DataSet::default();
        assert!(column_stats(&empty, "age").is_err());
    }

    #[test]
    fn stats_serialize_as_min_max_mean_object() {
        let ds = ages(vec![1.into(), 2.into()]);
        let stats = column_stats(&ds, "age").unwrap();
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(json, r#"{"min":1,"max":2,"mean":1.5}"#);
        assert_eq!(stats.to_string(), "{min: 1, max: 2, mean: 1.5}");
    }
}
