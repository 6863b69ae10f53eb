//! The question flow that turns flags, config and answers into a
//! [`Selection`].
//!
//! Each question is answered by the first of: an explicit flag, the
//! interactive prompt, the configured default.

use std::path::{Path, PathBuf};

use exgen_core::domain::{
    Cache, DEFAULT_PROJECT_NAME, Database, LanguageVariant, Selection, SqlEngine, ViewEngine,
    capabilities::{self, SQL_ENGINE_REGISTRY},
};
use tracing::debug;

use crate::{
    cli::NewArgs,
    config::Defaults,
    error::{CliError, CliResult},
};

/// Something that can ask the user a question.
pub trait Prompter {
    fn input(&self, prompt: &str, default: &str) -> CliResult<String>;
    /// Index of the chosen item.
    fn select(&self, prompt: &str, items: &[&str], default: usize) -> CliResult<usize>;
    fn confirm(&self, prompt: &str, default: bool) -> CliResult<bool>;
}

/// Answers every question with its default.
pub struct NoPrompt;

impl Prompter for NoPrompt {
    fn input(&self, _prompt: &str, default: &str) -> CliResult<String> {
        Ok(default.to_string())
    }
    fn select(&self, _prompt: &str, _items: &[&str], default: usize) -> CliResult<usize> {
        Ok(default)
    }
    fn confirm(&self, _prompt: &str, default: bool) -> CliResult<bool> {
        Ok(default)
    }
}

#[cfg(feature = "interactive")]
pub use interactive::Dialoguer;

#[cfg(feature = "interactive")]
mod interactive {
    use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

    use super::Prompter;
    use crate::error::{CliError, CliResult};

    /// Terminal prompts rendered with `dialoguer`.
    pub struct Dialoguer {
        theme: ColorfulTheme,
    }

    impl Dialoguer {
        pub fn new() -> Self {
            Self {
                theme: ColorfulTheme::default(),
            }
        }
    }

    fn prompt_error(err: dialoguer::Error) -> CliError {
        CliError::Prompt {
            message: err.to_string(),
        }
    }

    impl Prompter for Dialoguer {
        fn input(&self, prompt: &str, default: &str) -> CliResult<String> {
            Input::with_theme(&self.theme)
                .with_prompt(prompt)
                .default(default.to_string())
                .interact_text()
                .map_err(prompt_error)
        }

        fn select(&self, prompt: &str, items: &[&str], default: usize) -> CliResult<usize> {
            Select::with_theme(&self.theme)
                .with_prompt(prompt)
                .items(items)
                .default(default)
                .interact()
                .map_err(prompt_error)
        }

        fn confirm(&self, prompt: &str, default: bool) -> CliResult<bool> {
            Confirm::with_theme(&self.theme)
                .with_prompt(prompt)
                .default(default)
                .interact()
                .map_err(prompt_error)
        }
    }
}

const LANGUAGE_LABELS: [(&str, LanguageVariant); 2] = [
    ("Javascript es6+", LanguageVariant::JavaScript),
    ("Typescript", LanguageVariant::TypeScript),
];

const CACHE_LABELS: [(&str, Cache); 2] = [("none", Cache::None), ("redis", Cache::Redis)];

const VIEW_LABELS: [(&str, ViewEngine); 4] = [
    ("none (api only)", ViewEngine::ApiOnly),
    ("ejs", ViewEngine::Ejs),
    ("hbs", ViewEngine::Hbs),
    ("pug", ViewEngine::Pug),
];

/// Resolve the full selection. `ask` is [`NoPrompt`] when running
/// non-interactively.
pub fn resolve_selection(
    args: &NewArgs,
    defaults: &Defaults,
    ask: &dyn Prompter,
) -> CliResult<Selection> {
    let name = match &args.name {
        Some(name) => name.clone(),
        None => ask.input("Application name:", DEFAULT_PROJECT_NAME)?,
    };
    let (project_name, target) = resolve_project_path(&name)?;

    let language = match args.language {
        Some(lang) => lang.into(),
        None => choose(
            ask,
            "Use Typescript or Javascript es6+",
            &LANGUAGE_LABELS,
            defaults.language()?,
        )?,
    };

    let gitignore = if args.no_gitignore {
        false
    } else {
        ask.confirm("Include a .gitignore?", defaults.gitignore)?
    };

    let database = resolve_database(args, defaults, language, ask)?;

    let cache = match args.cache {
        Some(cache) => cache.into(),
        None => choose(ask, "Include cache:", &CACHE_LABELS, defaults.cache()?)?,
    };

    let view = match args.view {
        Some(view) => view.into(),
        None => choose(ask, "View engine:", &VIEW_LABELS, defaults.view()?)?,
    };

    debug!(%language, %database, %cache, %view, gitignore, "Answers resolved");

    let selection = Selection::builder()
        .language(language)
        .database(database)?
        .cache(cache)
        .view_engine(view)
        .gitignore(gitignore)
        .project_name(project_name)
        .target_directory(target)
        .build()?;
    Ok(selection)
}

fn resolve_database(
    args: &NewArgs,
    defaults: &Defaults,
    language: LanguageVariant,
    ask: &dyn Prompter,
) -> CliResult<Database> {
    let database = match args.database {
        Some(choice) => choice.as_str().parse::<Database>()?,
        None => {
            let offered: Vec<_> = capabilities::databases_for(language).collect();
            let labels: Vec<_> = offered.iter().map(|def| def.label).collect();
            let configured = defaults.database()?;
            let default = offered
                .iter()
                .position(|def| {
                    capabilities::find_database(configured)
                        .is_some_and(|found| found.label == def.label)
                })
                .unwrap_or(0);
            let index = ask.select("Include database config:", &labels, default)?;
            offered.get(index).map_or(Database::None, |def| def.database)
        }
    };

    if !database.is_relational() {
        if args.sql_engine.is_some() {
            return Err(CliError::InvalidInput {
                message: "--sql-engine requires --database sequelize".into(),
                source: None,
            });
        }
        return Ok(database);
    }

    let engine = match args.sql_engine {
        Some(engine) => engine.into(),
        None => {
            let labels: Vec<_> = SQL_ENGINE_REGISTRY.iter().map(|def| def.label).collect();
            let configured = defaults.sql_engine()?;
            let default = SQL_ENGINE_REGISTRY
                .iter()
                .position(|def| def.engine == configured)
                .unwrap_or(0);
            let index = ask.select("Choose SQL engine", &labels, default)?;
            SQL_ENGINE_REGISTRY
                .get(index)
                .map_or(SqlEngine::default(), |def| def.engine)
        }
    };
    Ok(Database::Relational(engine))
}

fn choose<T: Copy + PartialEq>(
    ask: &dyn Prompter,
    prompt: &str,
    options: &[(&str, T)],
    configured: T,
) -> CliResult<T> {
    let labels: Vec<_> = options.iter().map(|(label, _)| *label).collect();
    let default = options
        .iter()
        .position(|(_, value)| *value == configured)
        .unwrap_or(0);
    let index = ask.select(prompt, &labels, default)?;
    Ok(options.get(index).map_or(configured, |(_, value)| *value))
}

/// Split what the user typed into the package name and the directory to
/// generate into. `.` and `..` take their name from the resolved directory.
pub fn resolve_project_path(name: &str) -> CliResult<(String, PathBuf)> {
    let trimmed = name.trim();
    let target = PathBuf::from(trimmed);

    let project_name = match target.file_name().and_then(|n| n.to_str()) {
        Some(file_name) if trimmed != "." && trimmed != ".." => file_name.to_string(),
        _ => dir_name(&target)?,
    };

    Ok((project_name, target))
}

fn dir_name(path: &Path) -> CliResult<String> {
    let resolved = std::fs::canonicalize(path)?;
    resolved
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| CliError::InvalidInput {
            message: format!("cannot derive an application name from '{}'", path.display()),
            source: None,
        })
}
