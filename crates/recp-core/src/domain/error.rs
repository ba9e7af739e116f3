// ============================================================================
// domain/error.rs - EXPANSION DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside pipeline step errors)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Registry Errors
    // ========================================================================
    #[error("unknown transformation '{name}'")]
    UnknownTransformation { name: String },

    // ========================================================================
    // Parameter Errors
    // ========================================================================
    #[error("invalid parameter '{parameter}' for '{transformation}': {reason}")]
    InvalidParameter {
        transformation: String,
        parameter: String,
        reason: String,
    },

    #[error("missing required parameter '{parameter}' for '{transformation}'")]
    MissingParameter {
        transformation: String,
        parameter: String,
    },

    // ========================================================================
    // Recipe Errors
    // ========================================================================
    #[error("invalid recipe '{name}': {reason}")]
    InvalidRecipe { name: String, reason: String },
}

impl DomainError {
    /// Shorthand used by the parameter parsers.
    pub(crate) fn invalid(
        transformation: &str,
        parameter: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            transformation: transformation.to_string(),
            parameter: parameter.to_string(),
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownTransformation { name } => {
                let mut out = vec![format!("'{}' is not a registered transformation", name)];
                if let Some(close) = crate::domain::registry::closest_name(name) {
                    out.push(format!("Did you mean '{}'?", close));
                }
                out.push("Try: recp transformations".into());
                out
            }
            Self::InvalidParameter {
                transformation,
                parameter,
                ..
            } => vec![
                format!("Check the '{}' parameter of '{}'", parameter, transformation),
                "Try: recp transformations to see accepted parameters".into(),
            ],
            Self::MissingParameter {
                transformation,
                parameter,
            } => vec![format!(
                "Add '{}' to the '{}' step of your recipe",
                parameter, transformation
            )],
            Self::InvalidRecipe { name, .. } => vec![
                format!("Recipe '{}' could not be used", name),
                "Each run entry must look like `- name: { param: value }`".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownTransformation { .. } => ErrorCategory::NotFound,
            Self::InvalidParameter { .. }
            | Self::MissingParameter { .. }
            | Self::InvalidRecipe { .. } => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
