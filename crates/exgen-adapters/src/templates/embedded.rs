//! Templates compiled into the binary.

use rust_embed::RustEmbed;
use tracing::debug;

use exgen_core::{
    application::{ApplicationError, ports::TemplateSource},
    error::ExgenResult,
};

#[derive(RustEmbed)]
#[folder = "templates"]
struct Assets;

/// The built-in template set.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl EmbeddedTemplates {
    pub fn new() -> Self {
        Self
    }

    /// Every embedded template path, sorted.
    pub fn paths() -> Vec<String> {
        let mut paths: Vec<String> = Assets::iter().map(|p| p.into_owned()).collect();
        paths.sort();
        paths
    }
}

impl TemplateSource for EmbeddedTemplates {
    fn read(&self, path: &str) -> ExgenResult<String> {
        let file = Assets::get(path).ok_or_else(|| ApplicationError::TemplateNotFound {
            path: path.to_string(),
        })?;
        debug!(path, bytes = file.data.len(), "Read embedded template");
        String::from_utf8(file.data.into_owned()).map_err(|e| {
            ApplicationError::FilesystemError {
                path: path.into(),
                reason: format!("template is not UTF-8: {e}"),
            }
            .into()
        })
    }

    fn list(&self, dir: &str, glob: &str) -> ExgenResult<Vec<String>> {
        let paths = Self::paths();
        super::select_group(paths.iter().map(String::as_str), dir, glob)
    }
}
