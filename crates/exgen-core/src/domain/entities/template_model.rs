//! Per-file template model.
//!
//! A [`TemplateModel`] accumulates everything a generated source file needs
//! before rendering: external imports, relative imports, middleware
//! statements, route mounts and named code slots. It is plain data; the
//! rendering adapter consumes its serialized form as the template context.
//!
//! Lifecycle: one model per generated file per run, contributed to by zero or
//! more feature steps, rendered once.

use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::domain::{entities::common::Permissions, value_objects::LanguageVariant};

/// Slot holding the database initialisation block.
pub const SLOT_DB: &str = "db";
/// Slot holding the cache client setup.
pub const SLOT_CACHE: &str = "cache";
/// Slot holding view engine configuration.
pub const SLOT_VIEW: &str = "view";

// ── TemplateId ────────────────────────────────────────────────────────────────

/// Stable identifier of a rendered (not copied) project file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateId {
    /// `server/app.<ext>`: the Express application.
    ApplicationEntry,
    /// `server/bin/www.<ext>`: the HTTP server bootstrap script.
    ServerBootstrap,
    /// `.env`
    EnvironmentFile,
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [
        Self::ApplicationEntry,
        Self::ServerBootstrap,
        Self::EnvironmentFile,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ApplicationEntry => "app",
            Self::ServerBootstrap => "www",
            Self::EnvironmentFile => "env",
        }
    }

    /// Path of the template text inside the template source.
    pub fn template_path(&self, language: LanguageVariant) -> String {
        let ext = language.ext();
        match self {
            Self::ApplicationEntry => format!("{ext}/app.{ext}.j2"),
            Self::ServerBootstrap => format!("{ext}/www.{ext}.j2"),
            Self::EnvironmentFile => "env.j2".to_string(),
        }
    }

    /// Destination relative to the project root.
    pub fn destination(&self, language: LanguageVariant) -> String {
        let ext = language.ext();
        match self {
            Self::ApplicationEntry => format!("server/app.{ext}"),
            Self::ServerBootstrap => format!("server/bin/www.{ext}"),
            Self::EnvironmentFile => ".env".to_string(),
        }
    }

    pub const fn permissions(&self) -> Permissions {
        match self {
            Self::ServerBootstrap => Permissions::executable(),
            Self::ApplicationEntry | Self::EnvironmentFile => Permissions::regular(),
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Slot ──────────────────────────────────────────────────────────────────────

/// A named insertion point: either absent, or a code fragment spliced verbatim.
///
/// Serializes to `false` when absent so templates can guard the block with a
/// plain truthiness test.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Slot {
    #[default]
    Absent,
    Code(String),
}

impl Slot {
    pub fn code(code: impl Into<String>) -> Self {
        Self::Code(code.into())
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Code(_))
    }

    pub fn as_code(&self) -> Option<&str> {
        match self {
            Self::Code(code) => Some(code),
            Self::Absent => None,
        }
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Absent => serializer.serialize_bool(false),
            Self::Code(code) => serializer.serialize_str(code),
        }
    }
}

// ── RouteMount ────────────────────────────────────────────────────────────────

/// `app.use(path, code)`: a URL prefix and the expression naming its router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMount {
    pub path: String,
    pub code: String,
}

// ── TemplateModel ─────────────────────────────────────────────────────────────

/// Mutable contribution record for one generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateModel {
    #[serde(rename = "name")]
    id: TemplateId,
    modules: IndexMap<String, String>,
    local_modules: IndexMap<String, String>,
    uses: Vec<String>,
    mounts: Vec<RouteMount>,
    slots: IndexMap<String, Slot>,
}

impl TemplateModel {
    /// Create an empty model with the `db`, `cache` and `view` slots absent.
    pub fn new(id: TemplateId) -> Self {
        let slots = [SLOT_DB, SLOT_CACHE, SLOT_VIEW]
            .into_iter()
            .map(|name| (name.to_string(), Slot::Absent))
            .collect();

        Self {
            id,
            modules: IndexMap::new(),
            local_modules: IndexMap::new(),
            uses: Vec::new(),
            mounts: Vec::new(),
            slots,
        }
    }

    pub const fn id(&self) -> TemplateId {
        self.id
    }

    /// `import <binding> from '<package>'`. Re-registering a binding replaces
    /// the package and keeps the original position.
    pub fn register_module(
        &mut self,
        binding: impl Into<String>,
        package: impl Into<String>,
    ) -> &mut Self {
        self.modules.insert(binding.into(), package.into());
        self
    }

    /// `import <binding> from '<relative path>'`. Separate namespace from
    /// [`Self::register_module`].
    pub fn register_local_module(
        &mut self,
        binding: impl Into<String>,
        path: impl Into<String>,
    ) -> &mut Self {
        self.local_modules.insert(binding.into(), path.into());
        self
    }

    /// `app.use(<statement>)`. Appended in call order, never deduplicated.
    pub fn register_middleware(&mut self, statement: impl Into<String>) -> &mut Self {
        self.uses.push(statement.into());
        self
    }

    /// `app.use('<path>', <code>)`. Appended in call order.
    pub fn register_route_mount(
        &mut self,
        path: impl Into<String>,
        code: impl Into<String>,
    ) -> &mut Self {
        self.mounts.push(RouteMount {
            path: path.into(),
            code: code.into(),
        });
        self
    }

    /// Overwrite-upsert a named slot.
    pub fn set_slot(&mut self, name: impl Into<String>, value: Slot) -> &mut Self {
        self.slots.insert(name.into(), value);
        self
    }

    pub fn module(&self, binding: &str) -> Option<&str> {
        self.modules.get(binding).map(String::as_str)
    }

    pub fn local_module(&self, binding: &str) -> Option<&str> {
        self.local_modules.get(binding).map(String::as_str)
    }

    pub fn modules(&self) -> impl Iterator<Item = (&str, &str)> {
        self.modules.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn local_modules(&self) -> impl Iterator<Item = (&str, &str)> {
        self.local_modules
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn uses(&self) -> &[String] {
        &self.uses
    }

    pub fn mounts(&self) -> &[RouteMount] {
        &self.mounts
    }

    /// `None` only for slots that were never seeded nor set.
    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── registration ──────────────────────────────────────────────────────

    #[test]
    fn register_module_overwrites_keeping_position() {
        let mut model = TemplateModel::new(TemplateId::ApplicationEntry);
        model
            .register_module("logger", "morgan")
            .register_module("cors", "cors")
            .register_module("logger", "pino-http");

        assert_eq!(model.module("logger"), Some("pino-http"));
        let order: Vec<_> = model.modules().map(|(b, _)| b).collect();
        assert_eq!(order, ["logger", "cors"]);
    }

    #[test]
    fn local_modules_do_not_collide_with_packages() {
        let mut model = TemplateModel::new(TemplateId::ServerBootstrap);
        model
            .register_module("db", "mongojs")
            .register_local_module("db", "../models");

        assert_eq!(model.module("db"), Some("mongojs"));
        assert_eq!(model.local_module("db"), Some("../models"));
    }

    #[test]
    fn middleware_is_never_deduplicated() {
        let mut model = TemplateModel::new(TemplateId::ApplicationEntry);
        model
            .register_middleware("cors()")
            .register_middleware("cors()");

        assert_eq!(model.uses(), ["cors()", "cors()"]);
    }

    #[test]
    fn route_mounts_keep_call_order() {
        let mut model = TemplateModel::new(TemplateId::ApplicationEntry);
        model
            .register_route_mount("/api", "routes.hello")
            .register_route_mount("/api/users", "routes.users");

        let paths: Vec<_> = model.mounts().iter().map(|m| m.path.as_str()).collect();
        assert_eq!(paths, ["/api", "/api/users"]);
    }

    // ── slots ─────────────────────────────────────────────────────────────

    #[test]
    fn standard_slots_start_absent() {
        let model = TemplateModel::new(TemplateId::EnvironmentFile);
        for name in [SLOT_DB, SLOT_CACHE, SLOT_VIEW] {
            assert_eq!(model.slot(name), Some(&Slot::Absent));
        }
    }

    #[test]
    fn set_slot_overwrites() {
        let mut model = TemplateModel::new(TemplateId::ApplicationEntry);
        model.set_slot(SLOT_DB, Slot::code("a"));
        model.set_slot(SLOT_DB, Slot::code("b"));
        assert_eq!(model.slot(SLOT_DB).and_then(Slot::as_code), Some("b"));

        model.set_slot(SLOT_DB, Slot::Absent);
        assert!(!model.slot(SLOT_DB).unwrap().is_present());
    }

    // ── serialization ─────────────────────────────────────────────────────

    #[test]
    fn absent_slot_serializes_as_false() {
        let mut model = TemplateModel::new(TemplateId::ApplicationEntry);
        model.set_slot(SLOT_CACHE, Slot::code("redis()"));

        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["slots"]["db"], serde_json::Value::Bool(false));
        assert_eq!(value["slots"]["cache"], "redis()");
        assert_eq!(value["name"], "application-entry");
    }

    // ── TemplateId ────────────────────────────────────────────────────────

    #[test]
    fn bootstrap_destination_and_mode() {
        let id = TemplateId::ServerBootstrap;
        assert_eq!(id.destination(LanguageVariant::TypeScript), "server/bin/www.ts");
        assert_eq!(id.template_path(LanguageVariant::JavaScript), "js/www.js.j2");
        assert!(id.permissions().is_executable());
    }
}
