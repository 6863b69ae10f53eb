//! `exgen config`: write, show and locate the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
///
/// `explicit` is the `--config` path, which takes precedence over the
/// platform location for every subcommand.
pub fn execute(
    cmd: ConfigCommands,
    explicit: Option<PathBuf>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let path = explicit.unwrap_or_else(AppConfig::config_path);

    match cmd {
        ConfigCommands::Init { force } => {
            write_defaults(&path, force)?;
            output.success(&format!("Wrote {}", path.display()))?;
        }

        ConfigCommands::Show => {
            output.header("Current Configuration:")?;
            output.print(&config.to_toml()?)?;
        }

        ConfigCommands::Path => {
            // Always printed so scripts can capture it, even with --quiet.
            println!("{}", path.display());
        }
    }

    Ok(())
}

fn write_defaults(path: &Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::ConfigError {
            message: format!("{} already exists (use --force to overwrite)", path.display()),
            source: None,
        });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_cli_context(|| format!("creating {}", parent.display()))?;
    }

    let body = AppConfig::default().to_toml()?;
    fs::write(path, body).with_cli_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "Configuration written");
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────
