//! Row filtering for [`crate::types::DataSet`].

use crate::instrument::timed;
use crate::types::{DataSet, Value};

use super::lookup::LookupOptions;

/// Returns a new [`DataSet`] with the records whose `field` equals `target`.
///
/// A record lacking `field` reads it as [`Value::Null`], so a `Null` target also selects records
/// without the field. Use [`filter_rows_with`] to keep the two apart.
///
/// Records are cloned whole and keep their original relative order. No match is an empty
/// dataset, not an error.
///
/// # Example
///
/// ```rust
/// use record_utils::processing::filter_rows;
/// use record_utils::types::{DataSet, Record, Value};
///
/// let ds: DataSet = [("Alice", 23), ("Bob", 24), ("Alex", 23)]
///     .into_iter()
///     .map(|(name, age)| Record::from([("name", Value::from(name)), ("age", Value::from(age))]))
///     .collect();
///
/// let out = filter_rows(&ds, "age", &Value::from(23));
/// assert_eq!(out.row_count(), 2);
/// assert_eq!(out.records[1].get("name"), Some(&Value::from("Alex")));
/// ```
pub fn filter_rows(dataset: &DataSet, field: &str, target: &Value) -> DataSet {
    filter_rows_with(dataset, field, target, &LookupOptions::default())
}

/// [`filter_rows`] with explicit [`LookupOptions`].
pub fn filter_rows_with(
    dataset: &DataSet,
    field: &str,
    target: &Value,
    options: &LookupOptions,
) -> DataSet {
    timed("filter_rows", || {
        tracing::info!("Filtering records for key {field} over value: {target} ...");

        let out = dataset.filter_records(|record| options.lookup(record, field) == Some(target));

        tracing::debug!(
            "Filtered {} records successfully for key {field} = {target:?} !",
            out.row_count()
        );
        out
    })
}
