//! Jinja-style renderer backed by `minijinja`.
//!
//! Templates see the serialized [`TemplateModel`]: `modules` and
//! `local_modules` as ordered maps, `uses` and `mounts` as lists, and `slots`
//! as a map whose absent entries are `false`.
//!
//! Undefined lookups are errors, so a template that references a field the
//! model does not provide fails loudly instead of rendering an empty string.

use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};
use tracing::instrument;

use exgen_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::TemplateModel,
    error::ExgenResult,
};

/// Strict, non-escaping Jinja renderer.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        // Output is source code, never HTML.
        env.set_auto_escape_callback(|_| AutoEscape::None);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    #[instrument(skip(self, source, model), fields(model = %model.id()))]
    fn render(&self, name: &str, source: &str, model: &TemplateModel) -> ExgenResult<String> {
        self.env
            .render_named_str(name, source, Value::from_serialize(model))
            .map_err(|e| {
                ApplicationError::RenderingFailed {
                    template: name.to_string(),
                    reason: e.to_string(),
                }
                .into()
            })
    }
}
