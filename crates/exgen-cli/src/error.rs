//! CLI errors: everything that can stop a run, the suggestions shown with
//! it and the exit code it maps to.

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use exgen_core::domain::DomainError;
use exgen_core::error::ExgenError;

// Re-export so callers only need `use crate::error::*`.
pub use exgen_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input that clap could not catch.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Target directory has content and overwriting was not confirmed.
    #[error("Destination {path} is not empty")]
    ProjectExists { path: PathBuf },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `exgen-core`.
    #[error("Scaffolding failed: {0}")]
    Core(#[from] ExgenError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The interactive prompt could not be shown or read.
    #[error("Prompt failed: {message}")]
    Prompt { message: String },

    /// Operation cancelled by user.
    #[error("Operation cancelled")]
    Cancelled,

    /// External command failed.
    #[error("External command failed: {command}")]
    ExternalCommandFailed {
        command: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        CliError::Core(err.into())
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {message}"),
                "Use --help for usage information".into(),
            ],

            Self::ProjectExists { path } => vec![
                format!("'{}' already contains files", path.display()),
                "Use --force to delete it and generate again (destructive)".into(),
                "Choose a different application name".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                "Print the file location with 'exgen config path'".into(),
                "Regenerate defaults with 'exgen config init --force'".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
                "Check available disk space".into(),
            ],

            Self::Prompt { .. } => vec![
                "Run with --yes and flags to answer every question".into(),
                "Example: exgen my-api --lang ts --database mongoose --yes".into(),
            ],

            Self::Cancelled => vec!["Nothing was deleted or written".into()],

            Self::ExternalCommandFailed { command, .. } => vec![
                format!("Run '{command}' manually inside the project"),
                "Ensure the command is installed and in your PATH".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::ProjectExists { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::Compatibility => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::Prompt { .. } => ErrorCategory::Internal,
            Self::Cancelled => ErrorCategory::UserError,
            Self::ExternalCommandFailed { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Coloured report for a terminal.
    pub fn format_colored(&self, verbose: bool) -> String {
        self.render(verbose, true)
    }

    /// Same report without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        self.render(verbose, false)
    }

    fn render(&self, verbose: bool, colour: bool) -> String {
        let mut out = format!(
            "\n{} {}\n",
            paint(colour, "Error:", |t| t.red().bold().to_string()),
            paint(colour, &self.to_string(), |t| t.red().to_string()),
        );

        if verbose {
            for cause in self.causes() {
                out.push_str(&format!(
                    "  {} {}\n",
                    paint(colour, "Caused by:", |t| t.dimmed().to_string()),
                    cause
                ));
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str(&format!(
                "\n{}\n",
                paint(colour, "Suggestions:", |t| t.yellow().bold().to_string())
            ));
            for line in suggestions {
                out.push_str(&format!("  - {line}\n"));
            }
        }

        if !verbose && self.source().is_some() {
            out.push_str(&format!(
                "\n{}\n",
                paint(colour, "Run again with -v to see the cause.", |t| t.dimmed().to_string())
            ));
        }

        out
    }

    /// Rendered `source()` chain, outermost first.
    fn causes(&self) -> Vec<String> {
        std::iter::successors(self.source(), |&e| e.source())
            .map(ToString::to_string)
            .collect()
    }

    /// Record the failure in the log before it is printed.
    pub fn log(&self) {
        let category = self.category();
        let code = self.exit_code();
        match category {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(?category, exit_code = code, error = %self, "exgen stopped");
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(?category, exit_code = code, error = %self, "exgen failed");
            }
        }
        for cause in self.causes() {
            tracing::debug!(%cause, "caused by");
        }
    }
}

fn paint(colour: bool, text: &str, style: fn(&str) -> String) -> String {
    if colour { style(text) } else { text.to_string() }
}

/// Exit-code classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input, incompatible choices, refused or declined overwrite.
    UserError,
    NotFound,
    Configuration,
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}
