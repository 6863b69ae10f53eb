//! Project generation, the default command.
//!
//! Responsibility: resolve a `Selection` from flags, config and prompts, run
//! the pre-flight check, call the core scaffold service, then run the
//! best-effort setup steps and print next steps. No generation logic lives
//! here.

use std::io::IsTerminal as _;
use std::path::PathBuf;

use serde_json::json;
use tracing::{debug, info, instrument};

use exgen_adapters::{
    DirectoryTemplates, EmbeddedTemplates, LocalFilesystem, MiniJinjaRenderer, TEMPLATES_DIR_ENV,
};
use exgen_core::{
    application::{EntryKind, ScaffoldReport, ScaffoldService, TemplateSource},
    domain::{ScaffoldPlan, Selection},
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompts::{self, NoPrompt, Prompter},
    setup::{self, SetupOutcome},
};

/// Execute project generation.
///
/// Dispatch sequence:
/// 1. Resolve the selection (flags, then prompts, then config defaults)
/// 2. Early-exit with the plan if `--dry-run`
/// 3. Pre-flight: confirm before deleting a non-empty target
/// 4. Generate via `ScaffoldService`
/// 5. `npm install` and `git init`, best-effort
/// 6. Print next-steps guidance
#[instrument(skip_all)]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let interactive = is_interactive(&args);
    let prompter = prompter(interactive);

    let selection = prompts::resolve_selection(&args, &config.defaults, prompter.as_ref())?;
    debug!(%selection, interactive, "Selection resolved");

    let service = build_service(&args, &config);
    let target = selection.target_directory().to_path_buf();

    if args.dry_run {
        let plan = service.plan(&selection)?;
        return print_plan(&plan, &selection, service.target_has_content(&target)?, &output);
    }

    // Pre-flight: a non-empty destination is only ever replaced on request.
    if service.target_has_content(&target)? {
        let confirmed = if args.force {
            true
        } else if interactive {
            prompter.confirm("Destination is not empty, continue?", false)?
        } else {
            return Err(CliError::ProjectExists { path: target });
        };
        if !confirmed {
            return Err(CliError::Cancelled);
        }
        service.clear_target(&target)?;
    }

    output.header(&format!("Creating '{}'...", selection.project_name()))?;
    info!(project = %selection.project_name(), path = %target.display(), "Scaffold started");

    let report = service.scaffold(&selection)?;
    print_report(&report, &output)?;

    let outcome = SetupOutcome {
        installed: config.setup.install
            && !args.skip_install
            && setup::install_dependencies(&target, &output),
        git_initialised: config.setup.git_init
            && !args.skip_git
            && setup::init_repository(&target, &output),
    };

    output.json(&json!({
        "project": selection.project_name(),
        "root": target.display().to_string(),
        "files": report.files().map(|p| p.display().to_string()).collect::<Vec<_>>(),
        "installed": outcome.installed,
        "git": outcome.git_initialised,
    }))?;

    if !global.quiet {
        print_next_steps(&selection, outcome, &output)?;
    }
    Ok(())
}

/// Prompts need a terminal on both ends and the feature compiled in.
fn is_interactive(args: &NewArgs) -> bool {
    cfg!(feature = "interactive")
        && !args.yes
        && std::io::stdin().is_terminal()
        && std::io::stdout().is_terminal()
}

#[cfg(feature = "interactive")]
fn prompter(interactive: bool) -> Box<dyn Prompter> {
    if interactive {
        Box::new(prompts::Dialoguer::new())
    } else {
        Box::new(NoPrompt)
    }
}

#[cfg(not(feature = "interactive"))]
fn prompter(_interactive: bool) -> Box<dyn Prompter> {
    Box::new(NoPrompt)
}

/// Flag, then `EXGEN_TEMPLATES_DIR`, then config; otherwise the built-in set.
fn template_override(args: &NewArgs, config: &AppConfig) -> Option<PathBuf> {
    args.templates
        .clone()
        .or_else(|| std::env::var_os(TEMPLATES_DIR_ENV).map(PathBuf::from))
        .or_else(|| config.templates.local_path.clone())
}

fn build_service(args: &NewArgs, config: &AppConfig) -> ScaffoldService {
    let source: Box<dyn TemplateSource> = match template_override(args, config) {
        Some(dir) => {
            debug!(dir = %dir.display(), "Using template directory override");
            Box::new(DirectoryTemplates::new(dir))
        }
        None => Box::new(EmbeddedTemplates::new()),
    };

    ScaffoldService::new(
        source,
        Box::new(MiniJinjaRenderer::new()),
        Box::new(LocalFilesystem::new()),
    )
}

fn print_plan(
    plan: &ScaffoldPlan,
    selection: &Selection,
    target_has_content: bool,
    output: &OutputManager,
) -> CliResult<()> {
    output.info(&format!(
        "Dry run: would create '{}' at {}",
        selection.project_name(),
        plan.root().display()
    ))?;
    output.info(&format!("  {selection}"))?;
    if target_has_content {
        output.warning("Destination is not empty; a real run asks before deleting it")?;
    }
    for step in plan.steps() {
        output.print(&format!("  {step}"))?;
    }

    output.json(&json!({
        "project": selection.project_name(),
        "root": plan.root().display().to_string(),
        "steps": plan.steps().iter().map(ToString::to_string).collect::<Vec<_>>(),
    }))?;
    Ok(())
}

fn print_report(report: &ScaffoldReport, output: &OutputManager) -> CliResult<()> {
    for entry in &report.entries {
        output.created(&entry.path, entry.kind == EntryKind::Directory)?;
    }
    output.success(&format!("Created {} files", report.file_count()))?;
    Ok(())
}

fn print_next_steps(
    selection: &Selection,
    outcome: SetupOutcome,
    output: &OutputManager,
) -> CliResult<()> {
    if !selection.targets_current_dir() {
        output.command(
            "change directory",
            &format!("cd {}", selection.target_directory().display()),
        )?;
    }
    if !outcome.installed {
        output.command("install dependencies", "npm install")?;
    }
    output.command("run the app in dev watch mode", "npm start")?;

    output.print("")?;
    output.link("Hello world:", "localhost:3001/api")?;
    output.link("GET /users:", "localhost:3001/api/users")?;

    if selection.database().is_relational() {
        output.print("")?;
        output.warning(
            "NOTE: You must update the `.env` file with your database settings before starting.",
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_flag_beats_config() {
        let args = NewArgs {
            templates: Some(PathBuf::from("/flag")),
            ..NewArgs::default()
        };
        let mut config = AppConfig::default();
        config.templates.local_path = Some(PathBuf::from("/config"));
        assert_eq!(
            template_override(&args, &config),
            Some(PathBuf::from("/flag"))
        );
    }

    #[test]
    fn yes_disables_prompts() {
        let args = NewArgs {
            yes: true,
            ..NewArgs::default()
        };
        assert!(!is_interactive(&args));
    }
}
