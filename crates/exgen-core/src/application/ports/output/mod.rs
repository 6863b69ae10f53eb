//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `exgen-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{Permissions, TemplateModel};
use crate::error::ExgenResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `exgen_adapters::filesystem::LocalFilesystem` (production)
/// - `exgen_adapters::filesystem::MemoryFilesystem` (testing, dry runs)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ExgenResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> ExgenResult<()>;

    /// Set file mode. Non-unix adapters may only honour the executable bit.
    fn set_permissions(&self, path: &Path, permissions: Permissions) -> ExgenResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is a directory with no entries. `false` if missing.
    fn is_empty_dir(&self, path: &Path) -> ExgenResult<bool>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> ExgenResult<()>;
}

/// Port for reading template text.
///
/// Implemented by:
/// - `exgen_adapters::templates::EmbeddedTemplates` (built into the binary)
/// - `exgen_adapters::templates::DirectoryTemplates` (user override directory)
/// - `exgen_adapters::templates::MemoryTemplates` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateSource: Send + Sync {
    /// Read one template by its `/`-separated path.
    fn read(&self, path: &str) -> ExgenResult<String>;

    /// File names directly inside `dir` that match `glob`, sorted.
    fn list(&self, dir: &str, glob: &str) -> ExgenResult<Vec<String>>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `exgen_adapters::renderer::MiniJinjaRenderer`
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render `source` with `model` as context.
    ///
    /// # Arguments
    ///
    /// * `name` - Template name, used in error messages
    /// * `source` - Template text
    /// * `model` - Contribution record exposed to the template
    fn render(&self, name: &str, source: &str, model: &TemplateModel) -> ExgenResult<String>;
}
