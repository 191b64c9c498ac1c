//! Field lookup shared by filtering and grouping.

use crate::types::{Record, Value};

/// How a record that lacks the requested field is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingField {
    /// A missing field reads as [`Value::Null`], indistinguishable from an explicit null.
    #[default]
    AsNull,
    /// A missing field is kept apart: it never matches a filter target (not even `Null`) and
    /// is not placed in the `Null` group.
    Distinct,
}

/// Options controlling field lookup in [`super::filter_rows_with`] and [`super::group_by_with`].
///
/// Use [`Default`] for lookup-with-default semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupOptions {
    pub missing: MissingField,
}

impl LookupOptions {
    /// Options that keep missing fields apart from explicit nulls.
    pub fn distinct_missing() -> Self {
        Self {
            missing: MissingField::Distinct,
        }
    }

    /// Returns the value `record` holds under `field`, or `None` if the record is to be treated
    /// as lacking it.
    pub fn lookup<'a>(&self, record: &'a Record, field: &str) -> Option<&'a Value> {
        match self.missing {
            MissingField::AsNull => Some(record.get_or_null(field)),
            MissingField::Distinct => record.get(field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LookupOptions, MissingField};
    use crate::types::{Record, Value};

    #[test]
    fn default_lookup_reads_missing_as_null() {
        let rec = Record::from([("a", 1)]);
        let opts = LookupOptions::default();
        assert_eq!(opts.missing, MissingField::AsNull);
        assert_eq!(opts.lookup(&rec, "a"), Some(&Value::Int64(1)));
        assert_eq!(opts.lookup(&rec, "b"), Some(&Value::Null));
    }

    #[test]
    fn distinct_lookup_reports_missing() {
        let rec = Record::from([("a", Value::Null)]);
        let opts = LookupOptions::distinct_missing();
        assert_eq!(opts.lookup(&rec, "a"), Some(&Value::Null));
        assert_eq!(opts.lookup(&rec, "b"), None);
    }
}
