//! Core domain layer for exgen.
//!
//! This module contains pure generation logic with no I/O. Reading
//! templates, rendering and writing files are handled via ports (traits)
//! defined in the application layer.
//!
//! - **Selection**: validated user choices, built once
//! - **TemplateModel**: per-file contribution record, rendered once
//! - **ManifestBuilder**: ordered `package.json` pipeline
//! - **planner**: selection to ordered [`ScaffoldPlan`]
//!
//! The domain does not log; the application layer does.
pub mod capabilities;
pub mod defaults;
pub mod entities;
pub mod error;
pub mod manifest;
pub mod planner;
pub mod snippets;
pub mod value_objects;

mod validation;

pub use entities::{
    common::{Permissions, RelativePath},
    scaffold_plan::{PlanStep, ScaffoldPlan},
    selection::{DEFAULT_PROJECT_NAME, HasLanguage, NoLanguage, Selection, SelectionBuilder},
    template_model::{RouteMount, SLOT_CACHE, SLOT_DB, SLOT_VIEW, Slot, TemplateId, TemplateModel},
};

pub use error::{DomainError, ErrorCategory};
pub use manifest::{Manifest, ManifestBuilder, NodemonConfig};
pub use planner::plan_scaffold;
pub use validation::DomainValidator;

pub use value_objects::{Cache, Database, LanguageVariant, SqlEngine, ViewEngine};
