//! The `Selection` aggregate root and its typestate builder.
//!
//! A `Selection` is the normalized, validated record of what the user chose:
//! language variant, database (with its SQL engine), cache, view engine and
//! whether to ship a `.gitignore`. Every other component reads it; nothing
//! mutates it after `build()`.
//!
//! # Typestate builder
//!
//! The builder uses two phantom marker types (`NoLanguage` / `HasLanguage`) to
//! enforce at *compile time* that the language variant is chosen first, since
//! which databases are offered depends on it. Cross-field invariants are
//! re-checked by `validate` at `build()`.
//!
//! # Domain purity
//!
//! This module must not import `tracing`.

use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use heck::ToKebabCase;
use serde::{Deserialize, Serialize};

use crate::domain::{
    capabilities,
    error::DomainError,
    value_objects::{Cache, Database, LanguageVariant, SqlEngine, ViewEngine},
};

/// Project name used when the user gives none.
pub const DEFAULT_PROJECT_NAME: &str = "hello-world";

// ── Aggregate root ────────────────────────────────────────────────────────────

/// A fully-validated set of scaffolding choices.
///
/// Guaranteed on construction:
/// - `database` is offered for `language`
/// - `project_name` is non-empty and contains no path separators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    language: LanguageVariant,
    database: Database,
    cache: Cache,
    view_engine: ViewEngine,
    include_gitignore: bool,
    project_name: String,
    target_directory: PathBuf,
}

impl Selection {
    /// Start building a new `Selection`.
    pub fn builder() -> SelectionBuilder<NoLanguage> {
        SelectionBuilder::new()
    }

    pub const fn language(&self) -> LanguageVariant {
        self.language
    }
    pub const fn database(&self) -> Database {
        self.database
    }
    /// Defined iff the database is relational.
    pub const fn sql_engine(&self) -> Option<SqlEngine> {
        self.database.sql_engine()
    }
    pub const fn cache(&self) -> Cache {
        self.cache
    }
    pub const fn view_engine(&self) -> ViewEngine {
        self.view_engine
    }
    pub const fn include_gitignore(&self) -> bool {
        self.include_gitignore
    }
    pub fn project_name(&self) -> &str {
        &self.project_name
    }
    pub fn target_directory(&self) -> &Path {
        &self.target_directory
    }

    /// npm package name: the project name in kebab-case.
    pub fn package_name(&self) -> String {
        self.project_name.to_kebab_case()
    }

    /// Whether the project is generated into the working directory itself.
    pub fn targets_current_dir(&self) -> bool {
        self.target_directory == Path::new(".")
    }

    /// Validate internal consistency.
    ///
    /// Called automatically by the builder. Available for re-validation after
    /// deserialization.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_project_name(&self.project_name)?;

        if let Err(reason) = capabilities::validate_database(self.database, self.language) {
            return Err(DomainError::IncompatibleDatabase {
                database: self.database.to_string(),
                language: self.language.to_string(),
                reason,
            });
        }

        if self.target_directory.as_os_str().is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "target_directory",
            });
        }

        Ok(())
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, db: {}, cache: {}",
            self.project_name, self.language, self.database, self.cache
        )?;
        if self.view_engine.has_views() {
            write!(f, ", views: {}", self.view_engine)?;
        }
        f.write_str(")")
    }
}

fn validate_project_name(name: &str) -> Result<(), DomainError> {
    let reason = if name.trim().is_empty() {
        Some("name cannot be empty")
    } else if name.contains('/') || name.contains('\\') {
        Some("name cannot contain path separators")
    } else if name.starts_with('.') {
        Some("name cannot start with '.'")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(DomainError::InvalidProjectName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

// ── Typestate markers ─────────────────────────────────────────────────────────

/// Marker: language variant has not yet been chosen.
pub struct NoLanguage;
/// Marker: language variant chosen; other fields may now be configured.
pub struct HasLanguage;

// ── Builder ───────────────────────────────────────────────────────────────────

/// Typestate builder for [`Selection`].
pub struct SelectionBuilder<L> {
    language: LanguageVariant,
    database: Database,
    cache: Cache,
    view_engine: ViewEngine,
    include_gitignore: bool,
    project_name: Option<String>,
    target_directory: Option<PathBuf>,
    _marker: PhantomData<L>,
}

impl SelectionBuilder<NoLanguage> {
    pub fn new() -> Self {
        Self {
            language: LanguageVariant::default(),
            database: Database::None,
            cache: Cache::None,
            view_engine: ViewEngine::ApiOnly,
            include_gitignore: true,
            project_name: None,
            target_directory: None,
            _marker: PhantomData,
        }
    }

    /// Choose the language variant. Transitions the builder to `HasLanguage`.
    pub fn language(self, language: LanguageVariant) -> SelectionBuilder<HasLanguage> {
        SelectionBuilder {
            language,
            database: self.database,
            cache: self.cache,
            view_engine: self.view_engine,
            include_gitignore: self.include_gitignore,
            project_name: self.project_name,
            target_directory: self.target_directory,
            _marker: PhantomData,
        }
    }
}

impl Default for SelectionBuilder<NoLanguage> {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionBuilder<HasLanguage> {
    /// Choose the database.
    ///
    /// Rejects immediately if the database is not offered for the language.
    pub fn database(mut self, database: Database) -> Result<Self, DomainError> {
        if let Err(reason) = capabilities::validate_database(database, self.language) {
            return Err(DomainError::IncompatibleDatabase {
                database: database.to_string(),
                language: self.language.to_string(),
                reason,
            });
        }
        self.database = database;
        Ok(self)
    }

    pub fn cache(mut self, cache: Cache) -> Self {
        self.cache = cache;
        self
    }

    pub fn view_engine(mut self, view_engine: ViewEngine) -> Self {
        self.view_engine = view_engine;
        self
    }

    pub fn gitignore(mut self, include: bool) -> Self {
        self.include_gitignore = include;
        self
    }

    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    /// Directory to generate into. Defaults to `./<project_name>`.
    pub fn target_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.target_directory = Some(dir.into());
        self
    }

    /// Build and validate the `Selection`.
    pub fn build(self) -> Result<Selection, DomainError> {
        let project_name = self
            .project_name
            .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());
        let target_directory = self
            .target_directory
            .unwrap_or_else(|| PathBuf::from(&project_name));

        let selection = Selection {
            language: self.language,
            database: self.database,
            cache: self.cache,
            view_engine: self.view_engine,
            include_gitignore: self.include_gitignore,
            project_name,
            target_directory,
        };

        selection.validate()?;
        Ok(selection)
    }
}
