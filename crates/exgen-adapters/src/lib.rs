//! Infrastructure adapters for exgen.
//!
//! This crate implements the ports defined in `exgen_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod renderer;
pub mod templates;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::MiniJinjaRenderer;
pub use templates::{DirectoryTemplates, EmbeddedTemplates, MemoryTemplates, TEMPLATES_DIR_ENV};
