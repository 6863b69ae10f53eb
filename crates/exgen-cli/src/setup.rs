//! Post-generation steps run inside the new project.
//!
//! Every step is best-effort: a failure is logged and reported as a warning,
//! and the generated project stays usable without it.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{info, instrument, warn};

use crate::{
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Which steps succeeded, for the next-steps hints.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SetupOutcome {
    pub installed: bool,
    pub git_initialised: bool,
}

/// `npm install` with a spinner. Returns whether it succeeded.
#[instrument(skip(output))]
pub fn install_dependencies(dir: &Path, output: &OutputManager) -> bool {
    let spinner = output.spinner("Installing npm packages...");
    let result = run("npm", &["install"], dir);
    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            info!("npm packages installed");
            let _ = output.success("Installed npm packages");
            true
        }
        Err(e) => {
            warn!(error = %e, "npm install failed");
            let _ = output.warning("Dependencies failed to install. Please run `npm install`.");
            false
        }
    }
}

/// `git init`. Returns whether it succeeded.
#[instrument(skip(output))]
pub fn init_repository(dir: &Path, output: &OutputManager) -> bool {
    match run("git", &["init"], dir) {
        Ok(()) => {
            info!("git repository initialised");
            true
        }
        Err(e) => {
            warn!(error = %e, "git init failed");
            let _ = output.warning("Could not initialise a git repository. Run `git init` manually.");
            false
        }
    }
}

/// Run `program args..` in `dir`, capturing its output.
fn run(program: &str, args: &[&str], dir: &Path) -> CliResult<()> {
    let command = format!("{program} {}", args.join(" "));

    let out = Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| CliError::ExternalCommandFailed {
            command: command.clone(),
            source: Some(Box::new(e)),
        })?;

    if out.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();
        Err(CliError::ExternalCommandFailed {
            command,
            source: Some(format!("{}: {stderr}", out.status).into()),
        })
    }
}
