//! Error types for the WRF grid tools.

use thiserror::Error;

/// Result type alias using WrfError.
pub type WrfResult<T> = Result<T, WrfError>;

/// Primary error type for grid configuration and nesting operations.
#[derive(Debug, Error)]
pub enum WrfError {
    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unsupported projection '{0}': only 'lambert' is supported")]
    UnsupportedProjection(String),

    // === Request Errors ===
    #[error("Invalid parent domain {parent_id}: configuration has {max_dom} domain(s)")]
    InvalidParent { parent_id: i64, max_dom: usize },

    #[error("Geometry error: {0}")]
    Geometry(String),

    // === Infrastructure Errors ===
    #[error("I/O error: {0}")]
    Io(String),
}

impl WrfError {
    /// Create a Configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a Geometry error.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Create an InvalidParent error.
    pub fn invalid_parent(parent_id: i64, max_dom: usize) -> Self {
        Self::InvalidParent { parent_id, max_dom }
    }

    /// True when the fault lies with the caller's request rather than the
    /// existing configuration file.
    pub fn is_request_error(&self) -> bool {
        matches!(self, WrfError::InvalidParent { .. } | WrfError::Geometry(_))
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            WrfError::Io(_) => 1,
            WrfError::Configuration(_) | WrfError::UnsupportedProjection(_) => 2,
            WrfError::InvalidParent { .. } => 3,
            WrfError::Geometry(_) => 4,
        }
    }
}

impl From<std::io::Error> for WrfError {
    fn from(err: std::io::Error) -> Self {
        WrfError::Io(err.to_string())
    }
}
