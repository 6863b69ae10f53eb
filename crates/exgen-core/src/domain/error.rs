// ============================================================================
// domain/error.rs - SELECTION AND PLAN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (the CLI re-displays them)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Unknown {field} '{value}'")]
    UnknownOption { field: &'static str, value: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    // ========================================================================
    // Compatibility Errors
    // ========================================================================
    #[error("database '{database}' is not offered for {language}: {reason}")]
    IncompatibleDatabase {
        database: String,
        language: String,
        reason: String, // populated from capabilities::validate_database
    },

    // ========================================================================
    // Plan Violations
    // ========================================================================
    #[error("Scaffold plan is invalid: {0}")]
    InvalidPlan(String),

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidSelection(msg) => vec![
                "Check the options you selected".into(),
                format!("Details: {}", msg),
            ],
            Self::UnknownOption { field, value } => vec![
                format!("'{}' is not a recognised {}", value, field),
                "Run: exgen --help to see accepted values".into(),
            ],
            Self::IncompatibleDatabase { language, .. } => vec![
                format!("{} projects can use:", language),
                "  • none, mongoose, sequelize".into(),
                "mongojs is only offered for JavaScript projects".into(),
            ],
            Self::InvalidProjectName { .. } => vec![
                "Use letters, digits, hyphens and underscores".into(),
                "Examples: my-api, hello_world, service2".into(),
            ],
            Self::InvalidPlan(_) => vec![
                "The generated scaffold plan is inconsistent".into(),
                "This is a bug, please report it".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidSelection(_)
            | Self::UnknownOption { .. }
            | Self::InvalidProjectName { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::IncompatibleDatabase { .. } => ErrorCategory::Compatibility,
            Self::AbsolutePathNotAllowed { .. } | Self::InvalidPlan(_) => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    Internal,
}
