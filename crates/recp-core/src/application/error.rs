//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not parameter
//! or recipe validation. Those are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::{ErrorCategory, RecpError};

/// Errors that occur while running the expansion pipeline.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// An enumeration target does not exist.
    #[error("Folder not found: '{}'", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// A pipeline step failed; `source` holds the cause.
    #[error("transformation '{name}' (step {step}) failed: {source}")]
    TransformationFailed {
        step: usize,
        name: String,
        source: Box<RecpError>,
    },

    /// No recipe with this name or path.
    #[error("Recipe not found: {name}")]
    RecipeNotFound { name: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Shared state access failed (lock poisoned).
    #[error("Store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DirectoryNotFound { path } => vec![
                format!("Check that '{}' exists and is a folder", path.display()),
                "Relative paths are resolved from the current directory".into(),
            ],
            Self::TransformationFailed { source, .. } => source.suggestions(),
            Self::RecipeNotFound { name } => vec![
                format!("No recipe named '{}' is installed", name),
                "Try: recp list to see installed recipes".into(),
                "Or pass the path to a recipe file".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check file permissions".into(),
            ],
            Self::StoreLockError => vec!["Try again in a moment".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DirectoryNotFound { .. } | Self::RecipeNotFound { .. } => ErrorCategory::NotFound,
            Self::TransformationFailed { source, .. } => source.category(),
            Self::FilesystemError { .. } | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
