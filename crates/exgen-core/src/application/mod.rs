//! Application layer for exgen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! generation rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{CreatedEntry, EntryKind, ScaffoldReport, ScaffoldService};

pub use ports::{Filesystem, TemplateRenderer, TemplateSource};

pub use error::ApplicationError;
