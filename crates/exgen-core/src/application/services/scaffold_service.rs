//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Validate the selection and plan the project
//! 2. Read, render and write every planned file, in plan order
//! 3. Roll back the target directory if this run created it and a step failed
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer, TemplateSource},
    },
    domain::{DomainValidator as validator, PlanStep, ScaffoldPlan, Selection, plan_scaffold},
    error::ExgenResult,
};

/// Kind of path created during execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// One path created or written by a run, relative to the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// Outcome of a successful run, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub root: PathBuf,
    pub entries: Vec<CreatedEntry>,
}

impl ScaffoldReport {
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.entries
            .iter()
            .filter(|e| e.kind == EntryKind::File)
            .map(|e| e.path.as_path())
    }

    pub fn file_count(&self) -> usize {
        self.files().count()
    }

    fn record(&mut self, path: PathBuf, kind: EntryKind) {
        info!(path = %path.display(), ?kind, "create");
        self.entries.push(CreatedEntry { path, kind });
    }
}

/// Main scaffolding service.
///
/// Orchestrates planning, rendering and writing.
pub struct ScaffoldService {
    source: Box<dyn TemplateSource>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use exgen_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     source,     // impl TemplateSource
    ///     renderer,   // impl TemplateRenderer
    ///     filesystem, // impl Filesystem
    /// );
    /// ```
    pub fn new(
        source: Box<dyn TemplateSource>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            source,
            renderer,
            filesystem,
        }
    }

    /// Scaffold a new project: plan, then execute.
    #[instrument(
        skip_all,
        fields(
            project = %selection.project_name(),
            language = %selection.language(),
            target = %selection.target_directory().display()
        )
    )]
    pub fn scaffold(&self, selection: &Selection) -> ExgenResult<ScaffoldReport> {
        let plan = self.plan(selection)?;
        self.execute(&plan)
    }

    /// Validate the selection and compute its plan without touching disk.
    pub fn plan(&self, selection: &Selection) -> ExgenResult<ScaffoldPlan> {
        validator::validate_selection(selection)?;
        let plan = plan_scaffold(selection)?;
        debug!(steps = plan.step_count(), "Plan computed");
        Ok(plan)
    }

    /// Whether the target exists and already has entries.
    pub fn target_has_content(&self, root: &Path) -> ExgenResult<bool> {
        if !self.filesystem.exists(root) {
            return Ok(false);
        }
        Ok(!self.filesystem.is_empty_dir(root)?)
    }

    /// Delete a non-empty target so the plan can recreate it.
    ///
    /// The working directory itself is never removed; files generated into
    /// `.` overwrite whatever is there.
    pub fn clear_target(&self, root: &Path) -> ExgenResult<()> {
        if root == Path::new(".") {
            warn!("Generating into the current directory; existing files may be overwritten");
            return Ok(());
        }
        info!(path = %root.display(), "Removing existing directory");
        self.filesystem.remove_dir_all(root)
    }

    /// Execute a plan in order. Fails fast on the first error.
    #[instrument(skip_all, fields(root = %plan.root().display(), steps = plan.step_count()))]
    pub fn execute(&self, plan: &ScaffoldPlan) -> ExgenResult<ScaffoldReport> {
        validator::validate_plan(plan)?;

        // A pre-existing root belongs to the user, even when empty.
        let owns_root = plan.creates_root() && !self.filesystem.exists(plan.root());

        let mut report = ScaffoldReport {
            root: plan.root().to_path_buf(),
            entries: Vec::new(),
        };

        match self.execute_steps(plan, &mut report) {
            Ok(()) => {
                info!(files = report.file_count(), "Scaffold completed successfully");
                Ok(report)
            }
            Err(e) => {
                if owns_root {
                    warn!(error = %e, "Write failed, attempting rollback");
                    self.rollback(plan.root());
                }
                Err(e)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn execute_steps(&self, plan: &ScaffoldPlan, report: &mut ScaffoldReport) -> ExgenResult<()> {
        let root = plan.root();

        for step in plan.steps() {
            debug!(%step, "Executing");
            match step {
                PlanStep::CreateRoot => {
                    self.filesystem.create_dir_all(root)?;
                    report.record(root.to_path_buf(), EntryKind::Directory);
                }
                PlanStep::CreateDir(dir) => {
                    let path = root.join(dir);
                    self.filesystem.create_dir_all(&path)?;
                    report.record(path, EntryKind::Directory);
                }
                PlanStep::CopyTemplate { from, to } => {
                    let content = self.source.read(from)?;
                    self.write(root.join(to), &content, report)?;
                }
                PlanStep::CopyTemplateGroup {
                    from_dir,
                    to_dir,
                    glob,
                } => {
                    let names = self.source.list(from_dir, glob)?;
                    if names.is_empty() {
                        warn!(dir = %from_dir, %glob, "Template group matched no files");
                    }
                    for name in names {
                        let content = self.source.read(&format!("{from_dir}/{name}"))?;
                        self.write(root.join(to_dir).join(&name), &content, report)?;
                    }
                }
                PlanStep::Render {
                    template,
                    model,
                    to,
                    permissions,
                } => {
                    let source = self.source.read(template)?;
                    let content = self.renderer.render(template, &source, model)?;
                    let path = root.join(to);
                    self.write(path.clone(), &content, report)?;
                    if permissions.is_executable() {
                        self.filesystem.set_permissions(&path, *permissions)?;
                    }
                }
                PlanStep::WriteManifest { manifest, to } => {
                    let json = manifest.to_json().map_err(|e| {
                        ApplicationError::ManifestSerialization {
                            reason: e.to_string(),
                        }
                    })?;
                    self.write(root.join(to), &json, report)?;
                }
            }
        }

        Ok(())
    }

    fn write(&self, path: PathBuf, content: &str, report: &mut ScaffoldReport) -> ExgenResult<()> {
        self.filesystem.write_file(&path, content)?;
        report.record(path, EntryKind::File);
        Ok(())
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::ports::{MockFilesystem, MockTemplateRenderer, MockTemplateSource},
        domain::{
            LanguageVariant, Manifest, Permissions, RelativePath, TemplateId, TemplateModel,
        },
        error::ExgenError,
    };
    use mockall::{Sequence, predicate::eq};

    fn rel(path: &str) -> RelativePath {
        RelativePath::try_new(path).unwrap()
    }

    fn service(
        source: MockTemplateSource,
        renderer: MockTemplateRenderer,
        fs: MockFilesystem,
    ) -> ScaffoldService {
        ScaffoldService::new(Box::new(source), Box::new(renderer), Box::new(fs))
    }

    fn fs_error(path: &str) -> ExgenError {
        ApplicationError::FilesystemError {
            path: PathBuf::from(path),
            reason: "disk full".into(),
        }
        .into()
    }

    fn small_plan(root: &str) -> ScaffoldPlan {
        let mut plan = ScaffoldPlan::new(root);
        if root != "." {
            plan.push(PlanStep::CreateRoot);
        }
        plan.with_step(PlanStep::CreateDir(rel("server/bin")))
            .with_step(PlanStep::CopyTemplate {
                from: "js/babelrc".into(),
                to: rel(".babelrc"),
            })
            .with_step(PlanStep::WriteManifest {
                manifest: Box::new(Manifest::base("demo")),
                to: rel("package.json"),
            })
            .with_step(PlanStep::Render {
                template: "js/www.js.j2".into(),
                model: Box::new(TemplateModel::new(TemplateId::ServerBootstrap)),
                to: rel("server/bin/www.js"),
                permissions: Permissions::executable(),
            })
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn executes_steps_in_plan_order() {
        let mut seq = Sequence::new();
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        let mut source = MockTemplateSource::new();
        let mut renderer = MockTemplateRenderer::new();

        fs.expect_create_dir_all()
            .with(eq(PathBuf::from("demo")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        fs.expect_create_dir_all()
            .with(eq(PathBuf::from("demo/server/bin")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        source
            .expect_read()
            .with(eq("js/babelrc"))
            .returning(|_| Ok("{}".into()));
        fs.expect_write_file()
            .withf(|p, _| p == Path::new("demo/.babelrc"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        fs.expect_write_file()
            .withf(|p, c| p == Path::new("demo/package.json") && c.ends_with("}\n"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        source
            .expect_read()
            .with(eq("js/www.js.j2"))
            .returning(|_| Ok("server".into()));
        renderer
            .expect_render()
            .returning(|_, src, _| Ok(src.to_uppercase()));
        fs.expect_write_file()
            .withf(|p, c| p == Path::new("demo/server/bin/www.js") && c == "SERVER")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        fs.expect_set_permissions()
            .withf(|p, perms| p == Path::new("demo/server/bin/www.js") && perms.is_executable())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let report = service(source, renderer, fs)
            .execute(&small_plan("demo"))
            .unwrap();
        assert_eq!(report.file_count(), 3);
        assert_eq!(report.entries[0].path, PathBuf::from("demo"));
    }

    #[test]
    fn group_copy_writes_each_listed_file() {
        let plan = ScaffoldPlan::new(".")
            .with_step(PlanStep::CreateDir(rel("server/models")))
            .with_step(PlanStep::CopyTemplateGroup {
                from_dir: "ts/models/sequelize".into(),
                to_dir: rel("server/models"),
                glob: "*.ts".into(),
            });

        let mut fs = MockFilesystem::new();
        let mut source = MockTemplateSource::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        source
            .expect_list()
            .with(eq("ts/models/sequelize"), eq("*.ts"))
            .returning(|_, _| Ok(vec!["User.ts".into(), "index.ts".into()]));
        source
            .expect_read()
            .withf(|p| p.starts_with("ts/models/sequelize/"))
            .times(2)
            .returning(|p| Ok(p.to_string()));
        fs.expect_write_file()
            .withf(|p, _| p.starts_with("./server/models"))
            .times(2)
            .returning(|_, _| Ok(()));

        let report = service(source, MockTemplateRenderer::new(), fs)
            .execute(&plan)
            .unwrap();
        let files: Vec<_> = report.files().collect();
        assert_eq!(
            files,
            [
                Path::new("./server/models/User.ts"),
                Path::new("./server/models/index.ts")
            ]
        );
    }

    // ── failure handling ──────────────────────────────────────────────────

    #[test]
    fn write_failure_rolls_back_created_root() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        let mut source = MockTemplateSource::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        source.expect_read().returning(|_| Ok(String::new()));
        fs.expect_write_file()
            .times(1)
            .returning(|p, _| Err(fs_error(&p.display().to_string())));
        fs.expect_remove_dir_all()
            .with(eq(PathBuf::from("demo")))
            .times(1)
            .returning(|_| Ok(()));

        let err = service(source, MockTemplateRenderer::new(), fs)
            .execute(&small_plan("demo"))
            .unwrap_err();
        assert!(matches!(
            err,
            ExgenError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[test]
    fn failure_keeps_a_pre_existing_empty_root() {
        let mut fs = MockFilesystem::new();
        let mut source = MockTemplateSource::new();
        fs.expect_exists()
            .with(eq(PathBuf::from("demo")))
            .returning(|_| true);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        source.expect_read().returning(|_| Ok(String::new()));
        fs.expect_write_file()
            .returning(|p, _| Err(fs_error(&p.display().to_string())));
        fs.expect_remove_dir_all().never();

        let result = service(source, MockTemplateRenderer::new(), fs).execute(&small_plan("demo"));
        assert!(result.is_err());
    }

    #[test]
    fn failure_in_current_dir_never_removes_it() {
        let mut fs = MockFilesystem::new();
        let mut source = MockTemplateSource::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        source.expect_read().returning(|_| Ok(String::new()));
        fs.expect_write_file()
            .returning(|p, _| Err(fs_error(&p.display().to_string())));
        fs.expect_remove_dir_all().never();

        let result = service(source, MockTemplateRenderer::new(), fs).execute(&small_plan("."));
        assert!(result.is_err());
    }

    #[test]
    fn render_failure_aborts_before_later_writes() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        let mut source = MockTemplateSource::new();
        let mut renderer = MockTemplateRenderer::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        source.expect_read().returning(|_| Ok(String::new()));
        fs.expect_write_file().times(2).returning(|_, _| Ok(()));
        renderer.expect_render().returning(|name, _, _| {
            Err(ApplicationError::RenderingFailed {
                template: name.to_string(),
                reason: "undefined value".into(),
            }
            .into())
        });
        fs.expect_set_permissions().never();
        fs.expect_remove_dir_all().times(1).returning(|_| Ok(()));

        let err = service(source, renderer, fs)
            .execute(&small_plan("demo"))
            .unwrap_err();
        assert!(err.to_string().contains("js/www.js.j2"));
    }

    #[test]
    fn missing_template_is_fatal() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        let mut source = MockTemplateSource::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        source.expect_read().returning(|p| {
            Err(ApplicationError::TemplateNotFound {
                path: p.to_string(),
            }
            .into())
        });
        fs.expect_write_file().never();
        fs.expect_remove_dir_all().returning(|_| Ok(()));

        let result = service(source, MockTemplateRenderer::new(), fs).execute(&small_plan("demo"));
        assert!(matches!(
            result,
            Err(ExgenError::Application(
                ApplicationError::TemplateNotFound { .. }
            ))
        ));
    }

    // ── pre-flight ────────────────────────────────────────────────────────

    #[test]
    fn target_has_content_checks_emptiness() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_is_empty_dir().returning(|_| Ok(false));
        let svc = service(MockTemplateSource::new(), MockTemplateRenderer::new(), fs);
        assert!(svc.target_has_content(Path::new("demo")).unwrap());
    }

    #[test]
    fn missing_target_has_no_content() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_is_empty_dir().never();
        let svc = service(MockTemplateSource::new(), MockTemplateRenderer::new(), fs);
        assert!(!svc.target_has_content(Path::new("demo")).unwrap());
    }

    #[test]
    fn clearing_current_dir_is_a_no_op() {
        let mut fs = MockFilesystem::new();
        fs.expect_remove_dir_all().never();
        let svc = service(MockTemplateSource::new(), MockTemplateRenderer::new(), fs);
        assert!(svc.clear_target(Path::new(".")).is_ok());
    }

    // ── planning ──────────────────────────────────────────────────────────

    #[test]
    fn plan_does_not_touch_filesystem() {
        let svc = service(
            MockTemplateSource::new(),
            MockTemplateRenderer::new(),
            MockFilesystem::new(),
        );
        let selection = Selection::builder()
            .language(LanguageVariant::TypeScript)
            .build()
            .unwrap();
        let plan = svc.plan(&selection).unwrap();
        assert!(plan.creates_root());
        assert!(plan.manifest().is_some());
    }
}
