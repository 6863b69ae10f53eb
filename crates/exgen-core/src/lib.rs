//! exgen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the exgen
//! Express project generator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             exgen-cli (CLI)             │
//! │  (prompts, flags, config, npm/git)      │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (ScaffoldService)            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, TemplateSource, Renderer)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     exgen-adapters (Infrastructure)     │
//! │ (LocalFilesystem, EmbeddedTemplates,    │
//! │  MiniJinjaRenderer)                     │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (Selection, TemplateModel, Manifest,    │
//! │  ScaffoldPlan)                          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use exgen_core::prelude::*;
//!
//! let selection = Selection::builder()
//!     .language(LanguageVariant::TypeScript)
//!     .database(Database::Relational(SqlEngine::Postgres))?
//!     .cache(Cache::Redis)
//!     .project_name("inventory")
//!     .build()?;
//!
//! let service = ScaffoldService::new(source, renderer, filesystem);
//! let report = service.scaffold(&selection)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ScaffoldReport, ScaffoldService,
        ports::{Filesystem, TemplateRenderer, TemplateSource},
    };
    pub use crate::domain::{
        Cache, Database, LanguageVariant, Manifest, ManifestBuilder, PlanStep, ScaffoldPlan,
        Selection, SqlEngine, TemplateId, TemplateModel, ViewEngine,
    };
    pub use crate::error::{ExgenError, ExgenResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
