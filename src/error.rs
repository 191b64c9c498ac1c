use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for the transforms in [`crate::processing`].
pub type TransformResult<T> = Result<T, TransformError>;

/// Convenience result type for [`crate::io`] loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Convenience result type for [`crate::io`] saving.
pub type SaveResult<T> = Result<T, SaveError>;

/// Error type returned by the transforms.
///
/// Filtering and grouping never fail; only statistics and normalization have an error path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// No record held a numeric value for the requested field.
    #[error("no numeric values for field '{field}'")]
    EmptySelection { field: String },

    /// Normalization was asked to average zero values.
    #[error("cannot normalize empty input: division by zero")]
    EmptyInput,
}

/// Coarse classification of a [`LoadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadErrorKind {
    /// The file does not exist.
    NotFound,
    /// The file exists but could not be opened for reading.
    PermissionDenied,
    /// The content is not JSON, or not an array of flat objects.
    Malformed,
    /// Any other I/O failure (e.g. the path is a directory, invalid UTF-8).
    Other,
}

/// Error type returned when loading a dataset from JSON.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The text is not valid JSON.
    #[error("invalid json: {source}")]
    Malformed {
        #[source]
        source: serde_json::Error,
    },

    /// The text is valid JSON but does not describe an array of flat records.
    #[error("invalid json: {message}")]
    NotRecords { message: String },

    /// Underlying I/O error not covered by a more specific variant.
    #[error("io error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    /// Classify an I/O failure on `path` into the matching variant.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound { path, source },
            io::ErrorKind::PermissionDenied => LoadError::PermissionDenied { path, source },
            _ => LoadError::Io { path, source },
        }
    }

    pub fn kind(&self) -> LoadErrorKind {
        match self {
            LoadError::NotFound { .. } => LoadErrorKind::NotFound,
            LoadError::PermissionDenied { .. } => LoadErrorKind::PermissionDenied,
            LoadError::Malformed { .. } | LoadError::NotRecords { .. } => LoadErrorKind::Malformed,
            LoadError::Io { .. } => LoadErrorKind::Other,
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(source: serde_json::Error) -> Self {
        LoadError::Malformed { source }
    }
}

/// Error type returned when saving a dataset as JSON.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to serialize dataset: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("io error writing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::{LoadError, LoadErrorKind, TransformError};

    #[test]
    fn empty_selection_names_the_field() {
        let err = TransformError::EmptySelection {
            field: "salary".to_string(),
        };
        assert_eq!(err.to_string(), "no numeric values for field 'salary'");
    }

    #[test]
    fn io_errors_are_classified_by_kind() {
        let nf = LoadError::from_io("a.json", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(nf.kind(), LoadErrorKind::NotFound);
        assert!(nf.to_string().contains("a.json"));

        let pd = LoadError::from_io("a.json", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(pd.kind(), LoadErrorKind::PermissionDenied);

        let other = LoadError::from_io("a.json", io::Error::from(io::ErrorKind::InvalidData));
        assert_eq!(other.kind(), LoadErrorKind::Other);
    }

    #[test]
    fn json_syntax_errors_are_malformed() {
        let source = serde_json::from_str::<serde_json::Value>("[{").unwrap_err();
        let err = LoadError::from(source);
        assert_eq!(err.kind(), LoadErrorKind::Malformed);
        assert!(err.to_string().starts_with("invalid json"));
    }
}
