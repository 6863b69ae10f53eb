//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `EXGEN__DEFAULTS__LANGUAGE=typescript`
//! 3. Config file (`--config`, else the platform config directory)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use exgen_core::domain::{Cache, Database, LanguageVariant, SqlEngine, ViewEngine};

use crate::error::{CliError, CliResult};

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Answers used when neither a flag nor the prompt supplies one.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Post-generation steps.
    pub setup: SetupConfig,
    /// Template settings.
    pub templates: TemplateConfig,
}

/// Default answers, stored as the option names the prompts show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub language: String,
    pub database: String,
    pub sql_engine: String,
    pub cache: String,
    pub view: String,
    pub gitignore: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            language: LanguageVariant::default().as_str().into(),
            database: Database::default().as_str().into(),
            sql_engine: SqlEngine::default().as_str().into(),
            cache: Cache::default().as_str().into(),
            view: ViewEngine::default().as_str().into(),
            gitignore: true,
        }
    }
}

impl Defaults {
    pub fn language(&self) -> CliResult<LanguageVariant> {
        parse_default(&self.language)
    }

    /// The configured database; a relational choice carries the configured
    /// engine.
    pub fn database(&self) -> CliResult<Database> {
        match parse_default::<Database>(&self.database)? {
            Database::Relational(_) => Ok(Database::Relational(self.sql_engine()?)),
            other => Ok(other),
        }
    }

    pub fn sql_engine(&self) -> CliResult<SqlEngine> {
        parse_default(&self.sql_engine)
    }

    pub fn cache(&self) -> CliResult<Cache> {
        parse_default(&self.cache)
    }

    pub fn view(&self) -> CliResult<ViewEngine> {
        parse_default(&self.view)
    }
}

fn parse_default<T>(value: &str) -> CliResult<T>
where
    T: std::str::FromStr<Err = exgen_core::domain::DomainError>,
{
    value.parse().map_err(|e| CliError::ConfigError {
        message: format!("invalid default: {e}"),
        source: Some(Box::new(e)),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// Run `npm install` after generation.
    pub install: bool,
    /// Run `git init` after generation.
    pub git_init: bool,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            install: true,
            git_init: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory replacing the built-in template set.
    pub local_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration: defaults, then the file, then the environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .context("Failed to serialise built-in defaults")?;

        let settings = Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix("EXGEN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("Configuration has an invalid shape")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.exgen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "exgen", "exgen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".exgen.toml"))
    }

    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_answers_match_core_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(
            cfg.defaults.language().unwrap(),
            LanguageVariant::JavaScript
        );
        assert_eq!(cfg.defaults.database().unwrap(), Database::None);
        assert_eq!(cfg.defaults.view().unwrap(), ViewEngine::ApiOnly);
        assert!(cfg.defaults.gitignore);
        assert!(cfg.setup.install);
    }

    #[test]
    fn missing_default_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(&tmp.path().join("absent.toml"), false).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn explicit_file_must_exist() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("absent.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn file_overrides_defaults_partially() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("exgen.toml");
        fs::write(
            &path,
            "[defaults]\nlanguage = \"typescript\"\ndatabase = \"sequelize\"\nsql_engine = \"postgres\"\n\n[setup]\ninstall = false\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path, true).unwrap();
        assert_eq!(
            cfg.defaults.language().unwrap(),
            LanguageVariant::TypeScript
        );
        assert_eq!(
            cfg.defaults.database().unwrap(),
            Database::Relational(SqlEngine::Postgres)
        );
        assert!(!cfg.setup.install);
        assert!(cfg.setup.git_init);
        assert!(cfg.defaults.gitignore);
    }

    #[test]
    fn unknown_default_is_a_config_error() {
        let mut cfg = AppConfig::default();
        cfg.defaults.cache = "memcached".into();
        assert!(matches!(
            cfg.defaults.cache(),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn toml_round_trips_through_loader() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("exgen.toml");
        fs::write(&path, AppConfig::default().to_toml().unwrap()).unwrap();
        assert_eq!(
            AppConfig::load_from(&path, true).unwrap(),
            AppConfig::default()
        );
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
