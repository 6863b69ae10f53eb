//! Capability registry.
//!
//! Each database, SQL engine and view engine is described exactly once here.
//! The selection builder, the manifest pipeline and the prompt flow all read
//! these tables instead of carrying their own `match` arms.
//!
//! # Adding a New View Engine
//!
//! 1. Add a variant to `ViewEngine` in `value_objects.rs`
//! 2. Add one [`ViewEngineDef`] entry to [`VIEW_ENGINE_REGISTRY`]
//! 3. Ship `views/<ext>/` templates in the adapters crate

use crate::domain::value_objects::{Database, LanguageVariant, SqlEngine, ViewEngine};

// ── Database definitions ─────────────────────────────────────────────────────

/// Describes one database choice and which language variants offer it.
#[derive(Debug, Clone, Copy)]
pub struct DatabaseDef {
    /// Representative value. Relational entries carry the default engine.
    pub database: Database,

    /// Label shown by the interactive prompt.
    pub label: &'static str,

    /// Variants for which this choice is offered.
    pub languages: &'static [LanguageVariant],
}

const BOTH: &[LanguageVariant] = &[LanguageVariant::JavaScript, LanguageVariant::TypeScript];

/// Single source of truth for database availability.
pub static DATABASE_REGISTRY: &[DatabaseDef] = &[
    DatabaseDef {
        database: Database::None,
        label: "none",
        languages: BOTH,
    },
    DatabaseDef {
        database: Database::DocDriver,
        label: "mongo + mongojs",
        languages: &[LanguageVariant::JavaScript],
    },
    DatabaseDef {
        database: Database::DocOdm,
        label: "mongo + mongoose",
        languages: BOTH,
    },
    DatabaseDef {
        database: Database::Relational(SqlEngine::MySql),
        label: "sequelize",
        languages: BOTH,
    },
];

/// Whether two databases are the same kind, ignoring the SQL engine.
fn same_kind(a: Database, b: Database) -> bool {
    matches!((a, b), (Database::Relational(_), Database::Relational(_))) || a == b
}

pub fn find_database(database: Database) -> Option<&'static DatabaseDef> {
    DATABASE_REGISTRY
        .iter()
        .find(|def| same_kind(def.database, database))
}

/// Databases offered for a language variant, in prompt order.
pub fn databases_for(language: LanguageVariant) -> impl Iterator<Item = &'static DatabaseDef> {
    DATABASE_REGISTRY
        .iter()
        .filter(move |def| def.languages.contains(&language))
}

/// Check that `database` is offered for `language`.
///
/// Returns the human-readable reason on failure; the caller wraps it into
/// `DomainError::IncompatibleDatabase`.
pub fn validate_database(database: Database, language: LanguageVariant) -> Result<(), String> {
    match find_database(database) {
        Some(def) if def.languages.contains(&language) => Ok(()),
        Some(def) => Err(format!(
            "'{}' is only offered for {}",
            def.label,
            def.languages
                .iter()
                .map(|l| l.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )),
        None => Err(format!("'{database}' is not registered")),
    }
}

// ── SQL engine definitions ───────────────────────────────────────────────────

/// Describes the driver packages each relational engine needs.
#[derive(Debug, Clone, Copy)]
pub struct SqlEngineDef {
    pub engine: SqlEngine,
    pub label: &'static str,
    /// `(package, version range)` runtime dependencies.
    pub drivers: &'static [(&'static str, &'static str)],
}

pub static SQL_ENGINE_REGISTRY: &[SqlEngineDef] = &[
    SqlEngineDef {
        engine: SqlEngine::MySql,
        label: "MySQL",
        drivers: &[("mysql2", "^1.6.4")],
    },
    SqlEngineDef {
        engine: SqlEngine::Postgres,
        label: "Postgres",
        drivers: &[("pg", "^8.3.3"), ("pg-hstore", "^2.3.3")],
    },
    SqlEngineDef {
        engine: SqlEngine::MariaDb,
        label: "MariaDB",
        drivers: &[("mariadb", "^2.4.2")],
    },
];

pub fn find_sql_engine(engine: SqlEngine) -> Option<&'static SqlEngineDef> {
    SQL_ENGINE_REGISTRY.iter().find(|def| def.engine == engine)
}

/// Every package any SQL engine may pull in. Used to assert that exactly one
/// engine's drivers end up in a manifest.
pub fn all_sql_driver_packages() -> impl Iterator<Item = &'static str> {
    SQL_ENGINE_REGISTRY
        .iter()
        .flat_map(|def| def.drivers.iter().map(|(name, _)| *name))
}

// ── View engine definitions ──────────────────────────────────────────────────

/// Describes a server-side view engine.
#[derive(Debug, Clone, Copy)]
pub struct ViewEngineDef {
    pub engine: ViewEngine,
    /// npm package implementing the engine.
    pub package: &'static str,
    pub version: &'static str,
    /// Extension of the view templates (`views/<ext>/*.<ext>`).
    pub ext: &'static str,
}

pub static VIEW_ENGINE_REGISTRY: &[ViewEngineDef] = &[
    ViewEngineDef {
        engine: ViewEngine::Ejs,
        package: "ejs",
        version: "~2.6.1",
        ext: "ejs",
    },
    ViewEngineDef {
        engine: ViewEngine::Hbs,
        package: "hbs",
        version: "~4.0.4",
        ext: "hbs",
    },
    ViewEngineDef {
        engine: ViewEngine::Pug,
        package: "pug",
        version: "2.0.0-beta11",
        ext: "pug",
    },
];

/// `None` for [`ViewEngine::ApiOnly`].
pub fn find_view_engine(engine: ViewEngine) -> Option<&'static ViewEngineDef> {
    VIEW_ENGINE_REGISTRY.iter().find(|def| def.engine == engine)
}
