use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use crate::domain::{
    entities::{
        common::{Permissions, RelativePath},
        template_model::TemplateModel,
    },
    error::DomainError,
    manifest::Manifest,
};

/// Ordered file-system operations that materialize a project.
///
/// This is the output of planning. It contains no I/O, only data; the
/// application layer walks [`ScaffoldPlan::steps`] and executes them in order.
#[derive(Debug, Clone)]
pub struct ScaffoldPlan {
    pub(crate) root: PathBuf,
    pub(crate) steps: Vec<PlanStep>,
}

impl ScaffoldPlan {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            steps: Vec::new(),
        }
    }

    pub fn push(&mut self, step: PlanStep) -> &mut Self {
        self.steps.push(step);
        self
    }

    pub fn with_step(mut self, step: PlanStep) -> Self {
        self.push(step);
        self
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    /// Whether executing the plan creates the root directory itself.
    pub fn creates_root(&self) -> bool {
        matches!(self.steps.first(), Some(PlanStep::CreateRoot))
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// The manifest written by the plan, if any.
    pub fn manifest(&self) -> Option<&Manifest> {
        self.steps.iter().find_map(|s| match s {
            PlanStep::WriteManifest { manifest, .. } => Some(manifest.as_ref()),
            _ => None,
        })
    }

    /// Check structural consistency.
    ///
    /// - `CreateRoot` may only appear as the first step
    /// - every write targets the root or a directory created earlier
    /// - no destination file is written twice
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.steps.is_empty() {
            return Err(DomainError::InvalidPlan("plan has no steps".into()));
        }

        let mut created: HashSet<RelativePath> = HashSet::new();
        let mut written: HashSet<&RelativePath> = HashSet::new();

        for (index, step) in self.steps.iter().enumerate() {
            match step {
                PlanStep::CreateRoot if index != 0 => {
                    return Err(DomainError::InvalidPlan(
                        "root must be created before anything else".into(),
                    ));
                }
                PlanStep::CreateRoot => {}
                PlanStep::CreateDir(dir) => {
                    let mut current = Some(dir.clone());
                    while let Some(path) = current {
                        current = path.parent();
                        created.insert(path);
                    }
                }
                PlanStep::CopyTemplateGroup { to_dir, .. } => {
                    if !created.contains(to_dir) {
                        return Err(missing_parent(to_dir));
                    }
                }
                _ => {
                    let Some(dest) = step.destination() else {
                        continue;
                    };
                    if dest.parent().is_some_and(|parent| !created.contains(&parent)) {
                        return Err(missing_parent(dest));
                    }
                    if !written.insert(dest) {
                        return Err(DomainError::InvalidPlan(format!(
                            "{dest} is written more than once"
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

fn missing_parent(path: &RelativePath) -> DomainError {
    DomainError::InvalidPlan(format!(
        "{path} is written before its directory is created"
    ))
}

// ── Steps ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum PlanStep {
    /// Create the target directory. Omitted when generating into `.`.
    CreateRoot,

    /// Create a directory (and its ancestors) below the root.
    CreateDir(RelativePath),

    /// Copy one template file verbatim.
    CopyTemplate { from: String, to: RelativePath },

    /// Copy every file directly inside `from_dir` whose name matches `glob`.
    CopyTemplateGroup {
        from_dir: String,
        to_dir: RelativePath,
        glob: String,
    },

    /// Render a template with a model as context.
    Render {
        template: String,
        model: Box<TemplateModel>,
        to: RelativePath,
        permissions: Permissions,
    },

    /// Serialize the manifest as `package.json`.
    WriteManifest {
        manifest: Box<Manifest>,
        to: RelativePath,
    },
}

impl PlanStep {
    /// Single destination file, if the step writes exactly one.
    pub fn destination(&self) -> Option<&RelativePath> {
        match self {
            Self::CopyTemplate { to, .. }
            | Self::Render { to, .. }
            | Self::WriteManifest { to, .. } => Some(to),
            Self::CreateRoot | Self::CreateDir(_) | Self::CopyTemplateGroup { .. } => None,
        }
    }
}

impl fmt::Display for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateRoot => f.write_str("mkdir   ."),
            Self::CreateDir(dir) => write!(f, "mkdir   {dir}/"),
            Self::CopyTemplate { from, to } => write!(f, "copy    {to}  (from {from})"),
            Self::CopyTemplateGroup {
                from_dir,
                to_dir,
                glob,
            } => write!(f, "copy    {to_dir}/{glob}  (from {from_dir})"),
            Self::Render {
                template,
                to,
                permissions,
                ..
            } => write!(f, "render  {to}  (from {template}, mode {permissions})"),
            Self::WriteManifest { to, .. } => write!(f, "write   {to}"),
        }
    }
}
