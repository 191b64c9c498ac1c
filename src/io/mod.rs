//! Loading and saving datasets as JSON.
//!
//! Most callers should use [`load_json`] and [`save_json`]. [`load_json_with`] additionally
//! reports success/failure/alerts to a [`LoadObserver`].
//!
//! I/O failures are translated once, here, into [`crate::error::LoadError`] variants classified
//! by [`crate::error::LoadErrorKind`]; the transforms in [`crate::processing`] never see them.

pub mod json;
pub mod observability;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{LoadError, LoadErrorKind, LoadResult, SaveResult};
use crate::types::DataSet;

pub use json::{load_json_str, parse_scalar, save_json_with, to_json_string, SaveOptions};
pub use observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats, TracingObserver};

/// Options controlling [`load_json_with`].
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Load a dataset from a JSON file holding an array of flat objects.
///
/// # Errors
///
/// - [`LoadError::NotFound`] / [`LoadError::PermissionDenied`] / [`LoadError::Io`] when the file
///   cannot be read
/// - [`LoadError::Malformed`] when the text is not JSON
/// - [`LoadError::NotRecords`] when the JSON is not an array of flat objects
///
/// # Example
///
/// ```no_run
/// use record_utils::io::load_json;
/// use record_utils::processing::column_stats;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let ds = load_json("people.json")?;
/// println!("{}", column_stats(&ds, "age")?);
/// # Ok(())
/// # }
/// ```
pub fn load_json(path: impl AsRef<Path>) -> LoadResult<DataSet> {
    load_json_with(path, &LoadOptions::default())
}

/// Load a dataset from a JSON file, reporting the outcome to `options.observer`.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row count stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// ```no_run
/// use std::sync::Arc;
///
/// use record_utils::io::{load_json_with, LoadOptions, LoadSeverity, TracingObserver};
///
/// let opts = LoadOptions {
///     observer: Some(Arc::new(TracingObserver)),
///     alert_at_or_above: LoadSeverity::Critical,
/// };
///
/// // Missing files are Critical and trigger `on_alert` at this threshold.
/// let _err = load_json_with("does_not_exist.json", &opts).unwrap_err();
/// ```
pub fn load_json_with(path: impl AsRef<Path>, options: &LoadOptions) -> LoadResult<DataSet> {
    let path = path.as_ref();
    let result = json::load_json_from_path(path);

    if let Some(obs) = options.observer.as_ref() {
        let ctx = LoadContext {
            path: path.to_path_buf(),
        };
        match &result {
            Ok(ds) => obs.on_success(&ctx, LoadStats { rows: ds.row_count() }),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

/// Write a dataset to `path` as indented UTF-8 JSON.
pub fn save_json(dataset: &DataSet, path: impl AsRef<Path>) -> SaveResult<()> {
    json::save_json_to_path(dataset, path)
}

fn severity_for_error(e: &LoadError) -> LoadSeverity {
    match e.kind() {
        LoadErrorKind::NotFound | LoadErrorKind::PermissionDenied | LoadErrorKind::Other => {
            LoadSeverity::Critical
        }
        LoadErrorKind::Malformed => LoadSeverity::Error,
    }
}
