//! In-memory template source for tests.

use std::collections::BTreeMap;

use exgen_core::{
    application::{ApplicationError, ports::TemplateSource},
    error::ExgenResult,
};

/// Template texts keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplates {
    files: BTreeMap<String, String>,
}

impl MemoryTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }
}

impl TemplateSource for MemoryTemplates {
    fn read(&self, path: &str) -> ExgenResult<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::TemplateNotFound {
                path: path.to_string(),
            }
            .into()
        })
    }

    fn list(&self, dir: &str, glob: &str) -> ExgenResult<Vec<String>> {
        super::select_group(self.files.keys().map(String::as_str), dir, glob)
    }
}
