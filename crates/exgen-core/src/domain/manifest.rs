//! `package.json` model and the ordered pipeline that fills it.
//!
//! [`ManifestBuilder`] starts from a fixed base manifest and applies one step
//! per concern, each gated by the [`Selection`]. Steps are total and
//! idempotent: dependencies and scripts are upserted, so running a step twice
//! leaves the manifest unchanged. [`ManifestBuilder::materialize`] sorts both
//! dependency maps so the serialized file is reproducible.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::{
    capabilities,
    entities::selection::Selection,
    value_objects::{Cache, Database, LanguageVariant},
};

type Packages = &'static [(&'static str, &'static str)];

const BASE_DEPENDENCIES: Packages = &[("debug", "~2.6.9"), ("express", "~4.16.1")];

const BASE_DEV_DEPENDENCIES: Packages = &[
    ("jest", "^25.2.7"),
    ("npm-run-all", "^4.1.5"),
    ("rimraf", "^3.0.2"),
    ("nodemon", "^2.0.3"),
];

const BASE_SCRIPTS: Packages = &[
    ("start", "nodemon"),
    ("build", "npm-run-all clean transpile"),
    ("server", "node ./dist/bin/www"),
    ("dev", "NODE_ENV=development npm-run-all build server"),
    ("prod", "NODE_ENV=production npm-run-all build server"),
    ("clean", "rimraf dist"),
];

const TYPESCRIPT_TOOLCHAIN: Packages = &[
    ("@types/compression", "^1.7.0"),
    ("@types/cookie-parser", "1.4.2"),
    ("@types/cors", "^2.8.6"),
    ("@types/debug", "^4.1.5"),
    ("@types/express", "^4.17.6"),
    ("@types/helmet", "0.0.47"),
    ("@types/morgan", "^1.9.1"),
    ("tslib", "^2.0.0"),
    ("typescript", "^3.9.5"),
    ("dotenv", "^8.2.0"),
];

const BABEL_TOOLCHAIN: Packages = &[
    ("babel-plugin-inline-dotenv", "^1.5.0"),
    ("@babel/cli", "^7.8.4"),
    ("@babel/core", "^7.9.0"),
    ("@babel/node", "^7.8.7"),
    ("@babel/preset-env", "^7.9.0"),
    ("@babel/plugin-transform-runtime", "^7.11.5"),
];

const MIDDLEWARE: Packages = &[
    ("morgan", "^1.9.1"),
    ("cookie-parser", "^1.4.4"),
    ("helmet", "^3.22.0"),
    ("cors", "^2.8.5"),
    ("compression", "^1.7.4"),
];

const LINT: Packages = &[
    ("eslint", "^7.9.0"),
    ("eslint-config-airbnb-base", "^14.2.0"),
    ("eslint-plugin-import", "^2.22.0"),
];

const TYPESCRIPT_LINT: Packages = &[
    ("@typescript-eslint/eslint-plugin", "^4.1.1"),
    ("@typescript-eslint/parser", "^4.1.1"),
    ("eslint-config-airbnb-typescript", "^10.0.0"),
];

const TEST: Packages = &[("jest", "^25.5.4"), ("supertest", "^5.0.0")];

const TYPESCRIPT_TEST: Packages = &[
    ("ts-jest", "^25.5.1"),
    ("@types/jest", "^25.2.3"),
    ("@types/supertest", "^2.0.10"),
];

const HTTP_ERRORS: (&str, &str) = ("http-errors", "~1.6.3");

// ── Manifest ──────────────────────────────────────────────────────────────────

/// `nodemonConfig` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodemonConfig {
    pub exec: String,
    pub watch: Vec<String>,
    pub ignore: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<String>,
}

/// The generated `package.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub name: String,
    pub version: String,
    pub private: bool,
    pub main: String,
    pub scripts: IndexMap<String, String>,
    pub nodemon_config: NodemonConfig,
    pub dependencies: IndexMap<String, String>,
    pub dev_dependencies: IndexMap<String, String>,
}

impl Manifest {
    /// Base manifest every project starts from.
    pub fn base(package_name: impl Into<String>) -> Self {
        Self {
            name: package_name.into(),
            version: "1.0.0".into(),
            private: true,
            main: "dist/bin/www.js".into(),
            scripts: to_map(BASE_SCRIPTS),
            nodemon_config: NodemonConfig {
                exec: "npm run dev".into(),
                watch: vec!["server/*".into(), "public/*".into()],
                ignore: vec![
                    "**/__tests__/**".into(),
                    "*.test.js".into(),
                    "*.spec.js".into(),
                ],
                ext: None,
            },
            dependencies: to_map(BASE_DEPENDENCIES),
            dev_dependencies: to_map(BASE_DEV_DEPENDENCIES),
        }
    }

    /// Serialize as written to disk: two-space indent, trailing newline.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    pub fn has_dependency(&self, package: &str) -> bool {
        self.dependencies.contains_key(package)
    }

    pub fn has_dev_dependency(&self, package: &str) -> bool {
        self.dev_dependencies.contains_key(package)
    }
}

fn to_map(packages: Packages) -> IndexMap<String, String> {
    packages
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn merge(target: &mut IndexMap<String, String>, packages: Packages) {
    for (name, version) in packages {
        target.insert(name.to_string(), version.to_string());
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Ordered manifest pipeline.
///
/// ```rust
/// use exgen_core::domain::{LanguageVariant, ManifestBuilder, Selection};
///
/// let selection = Selection::builder()
///     .language(LanguageVariant::JavaScript)
///     .project_name("demo")
///     .build()
///     .unwrap();
/// let manifest = ManifestBuilder::new(&selection).run_pipeline().materialize();
/// assert!(manifest.has_dependency("express"));
/// ```
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    language: LanguageVariant,
    database: Database,
    cache: Cache,
    view: Option<&'static capabilities::ViewEngineDef>,
    manifest: Manifest,
}

impl ManifestBuilder {
    pub fn new(selection: &Selection) -> Self {
        Self {
            language: selection.language(),
            database: selection.database(),
            cache: selection.cache(),
            view: capabilities::find_view_engine(selection.view_engine()),
            manifest: Manifest::base(selection.package_name()),
        }
    }

    /// Build the complete manifest for a selection.
    pub fn for_selection(selection: &Selection) -> Manifest {
        Self::new(selection).run_pipeline().materialize()
    }

    /// Apply every step in its fixed order.
    pub fn run_pipeline(self) -> Self {
        self.choose_transpiler()
            .add_language_base_dev_dependencies()
            .add_middleware_dependencies()
            .add_database_dependencies()
            .add_cache_dependencies()
            .add_lint_dependencies()
            .add_test_dependencies()
            .add_view_dependencies()
    }

    /// `transpile` script, plus the watch extension for TypeScript.
    pub fn choose_transpiler(mut self) -> Self {
        let transpile = match self.language {
            LanguageVariant::TypeScript => {
                self.manifest.nodemon_config.ext = Some("ts".into());
                "tsc"
            }
            LanguageVariant::JavaScript => "babel ./server --out-dir dist --copy-files",
        };
        self.manifest
            .scripts
            .insert("transpile".into(), transpile.into());
        self
    }

    pub fn add_language_base_dev_dependencies(mut self) -> Self {
        let toolchain = match self.language {
            LanguageVariant::TypeScript => TYPESCRIPT_TOOLCHAIN,
            LanguageVariant::JavaScript => BABEL_TOOLCHAIN,
        };
        merge(&mut self.manifest.dev_dependencies, toolchain);
        self
    }

    pub fn add_middleware_dependencies(mut self) -> Self {
        merge(&mut self.manifest.dependencies, MIDDLEWARE);
        self
    }

    /// Driver, ODM or ORM for the chosen database.
    ///
    /// `mongojs` is never offered for TypeScript; a selection that carries
    /// that combination anyway gets no driver dependency.
    pub fn add_database_dependencies(mut self) -> Self {
        let typed = self.language.is_typed();
        match self.database {
            Database::None => {}
            Database::DocDriver if typed => {}
            Database::DocDriver => {
                self.add_dependency("mongojs", "^3.1.0");
            }
            Database::Relational(_) => {
                self = self.add_sql_engine_dependencies();
                self.add_dependency("sequelize", "^5.x");
                if typed {
                    self.add_dev_dependency("@types/sequelize", "^4.28.9");
                }
            }
            Database::DocOdm => {
                self.add_dependency("mongoose", "^5.3.16");
                if typed {
                    self.add_dev_dependency("@types/mongoose", "^5.7.24");
                }
            }
        }
        self
    }

    /// Driver packages of the selected SQL engine. No-op when the database is
    /// not relational.
    pub fn add_sql_engine_dependencies(mut self) -> Self {
        if let Some(def) = self
            .database
            .sql_engine()
            .and_then(capabilities::find_sql_engine)
        {
            merge(&mut self.manifest.dependencies, def.drivers);
        }
        self
    }

    pub fn add_cache_dependencies(mut self) -> Self {
        match self.cache {
            Cache::None => {}
            Cache::Redis => {
                self.add_dependency("redis", "^3.0.2");
                if self.language.is_typed() {
                    self.add_dev_dependency("@types/redis", "^2.8.27");
                }
            }
        }
        self
    }

    pub fn add_lint_dependencies(mut self) -> Self {
        merge(&mut self.manifest.dev_dependencies, LINT);
        if self.language.is_typed() {
            merge(&mut self.manifest.dev_dependencies, TYPESCRIPT_LINT);
        }
        self.manifest
            .scripts
            .insert("lint".into(), "eslint ./server".into());
        self
    }

    /// Test runner and HTTP assertions, for both language variants.
    pub fn add_test_dependencies(mut self) -> Self {
        merge(&mut self.manifest.dev_dependencies, TEST);
        if self.language.is_typed() {
            merge(&mut self.manifest.dev_dependencies, TYPESCRIPT_TEST);
        }
        self.manifest.scripts.insert("test".into(), "jest".into());
        self.manifest
            .scripts
            .insert("test:watch".into(), "jest --watch".into());
        self
    }

    /// Engine package and `http-errors` when server-side views are enabled.
    pub fn add_view_dependencies(mut self) -> Self {
        if let Some(def) = self.view {
            self.add_dependency(HTTP_ERRORS.0, HTTP_ERRORS.1);
            self.add_dependency(def.package, def.version);
        }
        self
    }

    /// Sort both dependency maps and hand out the manifest.
    pub fn materialize(mut self) -> Manifest {
        self.manifest.dependencies.sort_keys();
        self.manifest.dev_dependencies.sort_keys();
        self.manifest
    }

    fn add_dependency(&mut self, name: &str, version: &str) {
        self.manifest
            .dependencies
            .insert(name.to_string(), version.to_string());
    }

    fn add_dev_dependency(&mut self, name: &str, version: &str) {
        self.manifest
            .dev_dependencies
            .insert(name.to_string(), version.to_string());
    }
}
