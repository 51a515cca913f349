//! Error types for the namelist store.

use thiserror::Error;
use wrf_common::WrfError;

/// Errors that can occur while reading, querying or writing a namelist.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the document failed.
    #[error("namelist I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML syntax or serialization error.
    #[error("invalid YAML namelist: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON syntax or serialization error.
    #[error("invalid JSON namelist: {0}")]
    Json(#[from] serde_json::Error),

    /// The document does not have the section/variable layout.
    #[error("invalid namelist document: {0}")]
    InvalidDocument(String),

    /// A section or variable is absent.
    #[error("missing namelist key '{0}'")]
    MissingKey(String),

    /// A value has the wrong type for how it is used.
    #[error("'{key}' should be {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: String,
    },

    /// Text could not be converted to the type of the existing value.
    #[error("cannot set '{key}' to '{value}': {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// A key path is not of the form `section:variable[:index]`.
    #[error("invalid key path '{0}', expected section:variable[:index]")]
    InvalidPath(String),

    /// A list index is past the end of the list.
    #[error("index {index} out of range for '{key}' with {len} element(s)")]
    IndexOutOfRange { key: String, index: usize, len: usize },
}

impl StoreError {
    /// Create a TypeMismatch error from the offending value.
    pub fn type_mismatch(key: impl Into<String>, expected: &'static str, found: &serde_yaml::Value) -> Self {
        Self::TypeMismatch {
            key: key.into(),
            expected,
            found: crate::value::type_name(found).to_string(),
        }
    }

    /// Create an InvalidValue error.
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl From<StoreError> for WrfError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Io(e) => WrfError::Io(e.to_string()),
            other => WrfError::Configuration(other.to_string()),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
