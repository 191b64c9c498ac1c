//! In-memory record transformations.
//!
//! The processing layer operates on [`crate::types::DataSet`] values, typically produced by
//! [`crate::io::load_json`]. Every transform is a single pass that builds a new result and
//! leaves its input untouched.
//!
//! Currently implemented:
//!
//! - [`column_stats()`]: min/max/mean of a numeric column
//! - [`filter_rows()`]: records whose field equals a target value
//! - [`group_by()`]: records bucketed by a field's value, in first-occurrence order
//! - [`normalize()`] / [`Normalizer`]: memoized mean-centering of a numeric sequence
//!
//! Filtering and grouping read a missing field as [`crate::types::Value::Null`] by default;
//! the `_with` variants take [`LookupOptions`] to keep the two apart.
//!
//! ## Example: filter → group → stats
//!
//! ```rust
//! use record_utils::processing::{column_stats, filter_rows, group_by};
//! use record_utils::types::{DataSet, Number, Record, Value};
//!
//! let ds = DataSet::new(vec![
//!     Record::from([("dept", Value::from("IT")), ("salary", Value::from(2800)), ("active", Value::from(true))]),
//!     Record::from([("dept", Value::from("HR")), ("salary", Value::from(4200)), ("active", Value::from(true))]),
//!     Record::from([("dept", Value::from("IT")), ("salary", Value::from(6000)), ("active", Value::from(false))]),
//! ]);
//!
//! let active = filter_rows(&ds, "active", &Value::from(true));
//! let by_dept = group_by(&active, "dept");
//! assert_eq!(by_dept.len(), 2);
//!
//! let it = column_stats(&by_dept[&Value::from("IT")], "salary").unwrap();
//! assert_eq!(it.max, Number::Int(2800));
//! ```

pub mod filter;
pub mod group;
pub mod lookup;
pub mod normalize;
pub mod stats;

pub use filter::{filter_rows, filter_rows_with};
pub use group::{group_by, group_by_with, Grouping, Groups};
pub use lookup::{LookupOptions, MissingField};
pub use normalize::{
    default_normalizer, normalize, CacheStats, LruNormalizeCache, NormalizeCache, Normalizer,
    UnboundedCache,
};
pub use stats::{column_stats, ColumnStats};
