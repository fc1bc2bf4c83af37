//! Step form components.
//!
//! Each form knows nothing about the overall flow: it derives an initial
//! value from the draft, validates locally, and on confirmation emits a
//! step-scoped [`StepFragment`]. The controller decides what happens next.

pub mod basic_info;
pub mod common_areas;
pub mod form;
pub mod location;
pub mod media;
pub mod rules;
pub mod services;

pub use basic_info::{BasicInfoForm, BasicInfoInput};
pub use common_areas::CommonAreasForm;
pub use form::{sanitize_note, FieldErrors, Validator};
pub use location::LocationForm;
pub use media::MediaForm;
pub use rules::RulesForm;
pub use services::ServicesForm;

use crate::domain::{Draft, StepFragment};
use crate::wizard::WizardStep;

/// Navigation request emitted by a mounted step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Advance(StepFragment),
    Retreat,
}

/// Uniform contract shared by the step forms.
pub trait StepForm {
    /// Step this form is mounted on.
    const STEP: WizardStep;

    type Value;

    /// Value the form starts from, derived from the current draft.
    fn initial(draft: &Draft) -> Self::Value;

    fn validate(value: &Self::Value) -> FieldErrors;

    fn into_fragment(value: Self::Value) -> StepFragment;

    /// Validates and converts in one go; errors never leave the step.
    fn confirm(value: Self::Value) -> Result<StepFragment, FieldErrors> {
        let errors = Self::validate(&value);
        errors.into_result(())?;
        Ok(Self::into_fragment(value))
    }
}
