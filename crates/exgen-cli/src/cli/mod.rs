//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use exgen_core::domain::{Cache, LanguageVariant, SqlEngine, ViewEngine};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
///
/// Without a subcommand, `exgen [NAME] [OPTIONS]` generates a project.
#[derive(Debug, Parser)]
#[command(
    name    = "exgen",
    bin_name = "exgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Interactive Express backend scaffolding",
    long_about = "exgen asks a few questions (language, database, cache, views) \
                  and generates a ready-to-run Express backend.",
    after_help = "EXAMPLES:\n\
        \x20 exgen                                   # interactive, ./hello-world\n\
        \x20 exgen my-api --lang ts --yes\n\
        \x20 exgen shop --database mongoose --cache redis\n\
        \x20 exgen inventory --lang ts --database sequelize --sql-engine postgres\n\
        \x20 exgen completions bash > ~/.local/share/bash-completion/completions/exgen",
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Project generation arguments (used when no subcommand is given).
    #[command(flatten)]
    pub new: NewArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 exgen completions bash > ~/.local/share/bash-completion/completions/exgen\n\
            \x20 exgen completions zsh  > ~/.zfunc/_exgen\n\
            \x20 exgen completions fish > ~/.config/fish/completions/exgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the exgen configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 exgen config init\n\
            \x20 exgen config show\n\
            \x20 exgen config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for project generation.
///
/// Every choice is optional: missing answers come from the config file, then
/// from the interactive prompt, then from built-in defaults.
#[derive(Debug, Default, Args)]
pub struct NewArgs {
    /// Application name or path. `.` generates into the current directory.
    #[arg(value_name = "NAME", help = "Application name or path [default: hello-world]")]
    pub name: Option<String>,

    /// Source language.
    #[arg(
        short = 'l',
        long = "lang",
        value_name = "LANGUAGE",
        value_enum,
        help = "Use TypeScript or JavaScript es6+"
    )]
    pub language: Option<Language>,

    /// Database integration.
    #[arg(
        short = 'd',
        long = "database",
        value_name = "DATABASE",
        value_enum,
        help = "Include database config"
    )]
    pub database: Option<DatabaseChoice>,

    /// SQL engine behind sequelize.
    #[arg(
        long = "sql-engine",
        value_name = "ENGINE",
        value_enum,
        help = "SQL engine (with --database sequelize)"
    )]
    pub sql_engine: Option<Engine>,

    /// Cache client.
    #[arg(long = "cache", value_name = "CACHE", value_enum, help = "Include cache")]
    pub cache: Option<CacheChoice>,

    /// Server-side view engine.
    #[arg(
        long = "view",
        value_name = "ENGINE",
        value_enum,
        help = "View engine (default: api-only)"
    )]
    pub view: Option<View>,

    /// Omit `.gitignore`.
    #[arg(long = "no-gitignore", help = "Do not include a .gitignore")]
    pub no_gitignore: bool,

    /// Skip every prompt; unanswered questions use defaults.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip prompts and use defaults for unanswered questions"
    )]
    pub yes: bool,

    /// Delete a non-empty target directory without asking (destructive).
    #[arg(long = "force", help = "Overwrite a non-empty target directory")]
    pub force: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Do not run `npm install` afterwards.
    #[arg(long = "skip-install", help = "Skip installing npm packages")]
    pub skip_install: bool,

    /// Do not run `git init` afterwards.
    #[arg(long = "skip-git", help = "Skip git init")]
    pub skip_git: bool,

    /// Read templates from a directory instead of the built-in set.
    /// Falls back to `EXGEN_TEMPLATES_DIR`, then the config file.
    #[arg(
        long = "templates",
        value_name = "DIR",
        help = "Template directory override"
    )]
    pub templates: Option<PathBuf>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `exgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `exgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Write a configuration file populated with the defaults.
    Init {
        /// Overwrite an existing file.
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
    /// Print the effective configuration as TOML.
    Show,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Source languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Language {
    /// Also accepted as `js`.
    #[value(alias = "js")]
    JavaScript,
    /// Also accepted as `ts`.
    #[value(alias = "ts")]
    TypeScript,
}

impl From<Language> for LanguageVariant {
    fn from(value: Language) -> Self {
        match value {
            Language::JavaScript => Self::JavaScript,
            Language::TypeScript => Self::TypeScript,
        }
    }
}

/// Database integrations. The SQL engine is chosen separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum DatabaseChoice {
    None,
    Mongojs,
    #[value(alias = "mongo")]
    Mongoose,
    #[value(alias = "sql")]
    Sequelize,
}

impl DatabaseChoice {
    /// Name understood by the core `Database` parser.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Mongojs => "mongojs",
            Self::Mongoose => "mongoose",
            Self::Sequelize => "sequelize",
        }
    }
}

/// Relational engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Engine {
    Mysql,
    #[value(alias = "pg")]
    Postgres,
    Mariadb,
}

impl From<Engine> for SqlEngine {
    fn from(value: Engine) -> Self {
        match value {
            Engine::Mysql => Self::MySql,
            Engine::Postgres => Self::Postgres,
            Engine::Mariadb => Self::MariaDb,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum CacheChoice {
    None,
    Redis,
}

impl From<CacheChoice> for Cache {
    fn from(value: CacheChoice) -> Self {
        match value {
            CacheChoice::None => Self::None,
            CacheChoice::Redis => Self::Redis,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum View {
    #[value(alias = "none")]
    ApiOnly,
    Ejs,
    #[value(alias = "handlebars")]
    Hbs,
    Pug,
}

impl From<View> for ViewEngine {
    fn from(value: View) -> Self {
        match value {
            View::ApiOnly => Self::ApiOnly,
            View::Ejs => Self::Ejs,
            View::Hbs => Self::Hbs,
            View::Pug => Self::Pug,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
