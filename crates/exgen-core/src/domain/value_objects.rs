//! Domain value objects: LanguageVariant, Database, SqlEngine, Cache, ViewEngine.
//!
//! # Design
//!
//! These are pure value types (`Copy`, equality-by-value, no identity).
//! Which database a variant offers and which package a view engine pulls in
//! live in `capabilities.rs`. This file only defines the types, their string
//! representations, and their `FromStr` parsers.
//!
//! Unknown strings are rejected at the parse boundary with
//! [`DomainError::UnknownOption`]; once a value exists every `match` over it
//! is exhaustive.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── LanguageVariant ───────────────────────────────────────────────────────────

/// Source language of the generated project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageVariant {
    /// ES2015+ transpiled with Babel.
    #[default]
    JavaScript,
    /// Statically typed, compiled with `tsc`.
    TypeScript,
}

impl LanguageVariant {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
        }
    }

    /// Source file extension, which doubles as the template group root.
    pub const fn ext(&self) -> &'static str {
        match self {
            Self::JavaScript => "js",
            Self::TypeScript => "ts",
        }
    }

    pub const fn is_typed(self) -> bool {
        matches!(self, Self::TypeScript)
    }
}

impl fmt::Display for LanguageVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageVariant {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "javascript" | "js" | "es" | "es6" => Ok(Self::JavaScript),
            "typescript" | "ts" => Ok(Self::TypeScript),
            other => Err(DomainError::UnknownOption {
                field: "language",
                value: other.to_string(),
            }),
        }
    }
}

// ── SqlEngine ─────────────────────────────────────────────────────────────────

/// Relational engine behind the Sequelize ORM.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlEngine {
    #[default]
    MySql,
    Postgres,
    MariaDb,
}

impl SqlEngine {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Postgres => "postgres",
            Self::MariaDb => "mariadb",
        }
    }

    /// Sequelize `dialect` value written to `.env`.
    pub const fn dialect(&self) -> &'static str {
        self.as_str()
    }

    pub const fn default_port(&self) -> u16 {
        match self {
            Self::MySql | Self::MariaDb => 3306,
            Self::Postgres => 5432,
        }
    }
}

impl fmt::Display for SqlEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SqlEngine {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(Self::MySql),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "mariadb" | "maria" => Ok(Self::MariaDb),
            other => Err(DomainError::UnknownOption {
                field: "sql engine",
                value: other.to_string(),
            }),
        }
    }
}

// ── Database ──────────────────────────────────────────────────────────────────

/// Persistence layer of the generated project.
///
/// The SQL engine travels inside [`Database::Relational`], so a selection can
/// never carry an engine without a relational database or the reverse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Database {
    #[default]
    None,
    /// Thin document-store driver (`mongojs`).
    DocDriver,
    /// Document-store ODM (`mongoose`).
    DocOdm,
    /// Relational ORM (`sequelize`) over the given engine.
    Relational(SqlEngine),
}

impl Database {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::DocDriver => "mongojs",
            Self::DocOdm => "mongoose",
            Self::Relational(_) => "sequelize",
        }
    }

    pub const fn sql_engine(&self) -> Option<SqlEngine> {
        match self {
            Self::Relational(engine) => Some(*engine),
            _ => None,
        }
    }

    pub const fn is_relational(&self) -> bool {
        matches!(self, Self::Relational(_))
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relational(engine) => write!(f, "sequelize ({engine})"),
            other => f.write_str(other.as_str()),
        }
    }
}

impl FromStr for Database {
    type Err = DomainError;

    /// Parses the database kind. `sequelize` resolves to the default engine;
    /// callers with an explicit engine use [`Database::Relational`] directly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "mongojs" | "doc-driver" => Ok(Self::DocDriver),
            "mongoose" | "mongo" | "doc-odm" => Ok(Self::DocOdm),
            "sequelize" | "sql" | "relational" => Ok(Self::Relational(SqlEngine::default())),
            other => Err(DomainError::UnknownOption {
                field: "database",
                value: other.to_string(),
            }),
        }
    }
}

// ── Cache ─────────────────────────────────────────────────────────────────────

/// Key-value cache client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cache {
    #[default]
    None,
    Redis,
}

impl Cache {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Redis => "redis",
        }
    }
}

impl fmt::Display for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cache {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "redis" => Ok(Self::Redis),
            other => Err(DomainError::UnknownOption {
                field: "cache",
                value: other.to_string(),
            }),
        }
    }
}

// ── ViewEngine ────────────────────────────────────────────────────────────────

/// Server-side view engine. `ApiOnly` generates no views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewEngine {
    #[default]
    ApiOnly,
    Ejs,
    Hbs,
    Pug,
}

impl ViewEngine {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ApiOnly => "api-only",
            Self::Ejs => "ejs",
            Self::Hbs => "hbs",
            Self::Pug => "pug",
        }
    }

    pub const fn has_views(self) -> bool {
        !matches!(self, Self::ApiOnly)
    }
}

impl fmt::Display for ViewEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewEngine {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "api-only" | "api" | "none" => Ok(Self::ApiOnly),
            "ejs" => Ok(Self::Ejs),
            "hbs" | "handlebars" => Ok(Self::Hbs),
            "pug" | "jade" => Ok(Self::Pug),
            other => Err(DomainError::UnknownOption {
                field: "view engine",
                value: other.to_string(),
            }),
        }
    }
}
