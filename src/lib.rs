//! `record-utils` is a small library of helpers for flat, JSON-shaped records held in memory as a
//! [`types::DataSet`].
//!
//! ## What it does
//!
//! - [`processing::column_stats`]: min/max/mean of a numeric column
//! - [`processing::filter_rows`]: records whose field equals a target value
//! - [`processing::group_by`]: records bucketed by a field's value, in first-occurrence order
//! - [`processing::normalize`]: mean-centering of a numeric sequence, memoized by input
//!
//! Loading and saving JSON lives in [`io`]; the transforms never touch the filesystem.
//!
//! **Value types:**
//!
//! Record fields hold a [`types::Value`]:
//!
//! - [`types::Value::Int64`] and [`types::Value::Float64`] are the only numeric variants
//! - [`types::Value::Bool`] is never treated as a number, neither by statistics nor by equality
//! - [`types::Value::Utf8`] and [`types::Value::Null`]
//!
//! A field missing from a record reads as `Null` when filtering or grouping, unless
//! [`processing::MissingField::Distinct`] is requested.
//!
//! ## Quick example: load, filter, stats
//!
//! ```no_run
//! use record_utils::io::{load_json, save_json};
//! use record_utils::processing::{column_stats, filter_rows};
//! use record_utils::types::Value;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ds = load_json("employees.json")?;
//! let it = filter_rows(&ds, "department", &Value::from("IT"));
//! println!("salary: {}", column_stats(&it, "salary")?);
//! save_json(&it, "it.json")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Processing example
//!
//! ```rust
//! use record_utils::processing::{group_by, Normalizer};
//! use record_utils::types::{DataSet, Number, Record, Value};
//!
//! let ds = DataSet::new(vec![
//!     Record::from([("city", Value::from("Minsk")), ("age", Value::from(23))]),
//!     Record::from([("city", Value::from("Moscow")), ("age", Value::from(24))]),
//!     Record::from([("city", Value::from("Minsk")), ("age", Value::from(67))]),
//! ]);
//!
//! let groups = group_by(&ds, "city");
//! assert_eq!(groups[&Value::from("Minsk")].row_count(), 2);
//!
//! let ages: Vec<Number> = ds.iter().filter_map(|r| r.get_or_null("age").as_number()).collect();
//! let normalizer = Normalizer::new();
//! let centered = normalizer.normalize(&ages).unwrap();
//! assert_eq!(&*centered, &[-15.0, -14.0, 29.0]);
//! assert_eq!(normalizer.stats().misses, 1);
//! ```
//!
//! ## Logging
//!
//! Every transform emits `tracing` events (an entry line, a result summary at `DEBUG`, and its
//! execution time). Binaries can install a subscriber with [`logging::init_logging`].
//!
//! ## Modules
//!
//! - [`types`]: values, records, and datasets
//! - [`processing`]: the transforms
//! - [`io`]: JSON load/save and load observers
//! - [`error`]: error types
//! - [`logging`]: subscriber setup for binaries

pub mod error;
mod instrument;
pub mod io;
pub mod logging;
pub mod processing;
pub mod types;

pub use error::{
    LoadError, LoadErrorKind, LoadResult, SaveError, SaveResult, TransformError, TransformResult,
};
