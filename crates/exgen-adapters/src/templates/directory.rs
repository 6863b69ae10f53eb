//! Templates read from a directory on disk.

use std::{fs, io, path::PathBuf};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use exgen_core::{
    application::{ApplicationError, ports::TemplateSource},
    error::ExgenResult,
};

/// A template set laid out like the built-in one, rooted at `root`.
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    root: PathBuf,
}

impl DirectoryTemplates {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl TemplateSource for DirectoryTemplates {
    fn read(&self, path: &str) -> ExgenResult<String> {
        let full = self.root.join(path);
        fs::read_to_string(&full).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ApplicationError::TemplateNotFound {
                path: full.display().to_string(),
            }
            .into(),
            _ => ApplicationError::FilesystemError {
                path: full.clone(),
                reason: e.to_string(),
            }
            .into(),
        })
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn list(&self, dir: &str, glob: &str) -> ExgenResult<Vec<String>> {
        let base = self.root.join(dir);
        let mut relative = Vec::new();

        for entry in WalkDir::new(&base).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| ApplicationError::FilesystemError {
                path: base.clone(),
                reason: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                relative.push(format!("{}/{}", dir.trim_end_matches('/'), name));
            }
        }

        let names = super::select_group(relative.iter().map(String::as_str), dir, glob)?;
        debug!(count = names.len(), "Listed template group");
        Ok(names)
    }
}
