use crate::domain::{
    entities::{ScaffoldPlan, Selection},
    error::DomainError,
};

/// Centralized domain validation.
///
/// Entry point for callers that hold values which did not come through a
/// validating constructor (deserialized selections, hand-built plans).
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_selection(selection: &Selection) -> Result<(), DomainError> {
        selection.validate()
    }

    pub fn validate_plan(plan: &ScaffoldPlan) -> Result<(), DomainError> {
        plan.validate()
    }
}
