pub mod common;
pub mod scaffold_plan;
pub mod selection;
pub mod template_model;

pub use crate::domain::DomainError;
pub use scaffold_plan::{PlanStep, ScaffoldPlan};
pub use selection::Selection;
pub use template_model::TemplateModel;
