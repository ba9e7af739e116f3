//! Unified error handling for recp core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for recp core operations.
#[derive(Debug, Error, Clone)]
pub enum RecpError {
    /// Errors from the domain layer (invalid parameters, unknown names).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (missing folders, failed steps).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl RecpError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in recp".into(),
                "Please report this issue at: https://github.com/recp-dev/recp/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The innermost error, looking through pipeline step wrappers.
    pub fn root_cause(&self) -> &RecpError {
        match self {
            Self::Application(ApplicationError::TransformationFailed { source, .. }) => {
                source.root_cause()
            }
            other => other,
        }
    }

    /// Name of the failed transformation, if this error came from a step.
    pub fn failed_transformation(&self) -> Option<&str> {
        match self {
            Self::Application(ApplicationError::TransformationFailed { name, .. }) => Some(name),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type RecpResult<T> = Result<T, RecpError>;

/// Extension trait for attaching a filesystem path to I/O failures.
pub trait Context<T> {
    /// Wrap the error as a [`ApplicationError::FilesystemError`] at `path`.
    fn fs_context(self, path: impl Into<std::path::PathBuf>, action: &str) -> RecpResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn fs_context(self, path: impl Into<std::path::PathBuf>, action: &str) -> RecpResult<T> {
        self.map_err(|e| {
            ApplicationError::FilesystemError {
                path: path.into(),
                reason: format!("failed to {action}: {e}"),
            }
            .into()
        })
    }
}
