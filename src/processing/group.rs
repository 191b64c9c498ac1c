//! Grouping records by the value of one field.

use indexmap::IndexMap;

use crate::instrument::timed;
use crate::types::{DataSet, Value};

use super::lookup::LookupOptions;

/// Buckets keyed by field value.
///
/// Keys iterate in first-occurrence order; each bucket keeps the original relative order of its
/// records.
pub type Groups = IndexMap<Value, DataSet>;

/// Result of [`group_by_with`]: the groups plus records set aside for lacking the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouping {
    pub groups: Groups,
    /// Records without the field. Always empty under [`super::MissingField::AsNull`].
    pub missing: DataSet,
}

impl Grouping {
    /// Total number of records across all groups and `missing`.
    pub fn record_count(&self) -> usize {
        self.groups.values().map(DataSet::row_count).sum::<usize>() + self.missing.row_count()
    }
}

/// Partition records into buckets keyed by the value of `field`.
///
/// A record lacking `field` is keyed by [`Value::Null`], together with records holding an
/// explicit null. Never fails; an empty dataset yields no groups.
///
/// # Example
///
/// ```rust
/// use record_utils::processing::group_by;
/// use record_utils::types::{DataSet, Record, Value};
///
/// let ds: DataSet = ["Minsk", "Moscow", "Minsk"]
///     .into_iter()
///     .map(|city| Record::from([("city", city)]))
///     .collect();
///
/// let groups = group_by(&ds, "city");
/// let keys: Vec<_> = groups.keys().map(|k| k.to_string()).collect();
/// assert_eq!(keys, vec!["Minsk", "Moscow"]);
/// assert_eq!(groups[&Value::from("Minsk")].row_count(), 2);
/// ```
pub fn group_by(dataset: &DataSet, field: &str) -> Groups {
    group_by_with(dataset, field, &LookupOptions::default()).groups
}

/// [`group_by`] with explicit [`LookupOptions`].
pub fn group_by_with(dataset: &DataSet, field: &str, options: &LookupOptions) -> Grouping {
    timed("group_by", || {
        tracing::info!("Grouping records for key {field} ...");

        let mut grouping = Grouping::default();
        for record in dataset {
            match options.lookup(record, field) {
                Some(key) => grouping
                    .groups
                    .entry(key.clone())
                    .or_default()
                    .records
                    .push(record.clone()),
                None => grouping.missing.records.push(record.clone()),
            }
        }

        tracing::debug!(
            "Records for key {field} were successfully grouped into {} groups!",
            grouping.groups.len()
        );
        grouping
    })
}
