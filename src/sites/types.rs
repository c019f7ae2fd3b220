//! Site domain types and error definitions.

use thiserror::Error;

/// Errors that can occur while manipulating site configurations.
#[derive(Debug, Error)]
pub enum SiteError {
    /// Name contains characters outside the allow-list or is empty.
    #[error("Invalid site name {0:?}: only alphanumerics, '.', '_' and '-' are allowed")]
    InvalidName(String),

    /// A configuration with this name already exists (duplicate create).
    #[error("Configuration for {0} already exists")]
    AlreadyExists(String),

    /// The configuration file or log file is absent.
    #[error("Configuration {0} not found")]
    NotFound(String),

    /// Filesystem operation failed (permissions, disk).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for site operations.
pub type SiteResult<T> = Result<T, SiteError>;

/// Terminal result of a lifecycle operation.
///
/// Every coordinator operation completes with one of these; internal errors
/// are folded into `success = false` and never escape as panics. A failed
/// outcome means "state may have changed, verify before retrying" -- partial
/// completion (file written but validation failed) is still reported as
/// failure of the overall operation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct OperationOutcome {
    pub success: bool,
    pub message: String,
}

impl OperationOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
