//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not in the
//! generation rules. Rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while executing a scaffold plan.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Template text and model disagree (unknown variable, syntax error).
    #[error("Failed to render template '{template}': {reason}")]
    RenderingFailed { template: String, reason: String },

    /// A template the plan refers to is not in the template source.
    #[error("Template not found: {path}")]
    TemplateNotFound { path: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Shared in-memory state lock was poisoned.
    #[error("Internal lock poisoned")]
    StoreLockError,

    /// Target directory exists and already has content.
    #[error("Directory {path} is not empty")]
    DirectoryNotEmpty { path: PathBuf },

    /// The manifest could not be serialized.
    #[error("Failed to serialize package.json: {reason}")]
    ManifestSerialization { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RenderingFailed { template, .. } => vec![
                format!("Template '{}' does not match its model", template),
                "If you use a custom template directory, compare it with the built-in set".into(),
                "Unset EXGEN_TEMPLATES_DIR to fall back to the built-in templates".into(),
            ],
            Self::TemplateNotFound { path } => vec![
                format!("Missing template: {}", path),
                "Check EXGEN_TEMPLATES_DIR or templates.local_path in your config".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the disk is not full".into(),
            ],
            Self::DirectoryNotEmpty { path } => vec![
                format!("{} already has files in it", path.display()),
                "Pass --force to empty it first (destructive)".into(),
                "Or choose a different project name".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::DirectoryNotEmpty { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. }
            | Self::StoreLockError
            | Self::RenderingFailed { .. }
            | Self::ManifestSerialization { .. } => ErrorCategory::Internal,
        }
    }
}
