use std::collections::HashSet;

use uuid::Uuid;

use crate::domain::{Draft, StepFragment};
use crate::wizard::WizardStep;

use super::{FieldErrors, StepForm};

pub struct CommonAreasForm;

impl StepForm for CommonAreasForm {
    const STEP: WizardStep = WizardStep::CommonAreas;
    type Value = Vec<Uuid>;

    fn initial(draft: &Draft) -> Self::Value {
        draft.common_area_ids.clone()
    }

    fn validate(value: &Self::Value) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let mut seen = HashSet::new();
        for (index, id) in value.iter().enumerate() {
            if !seen.insert(*id) {
                errors.add(
                    format!("commonAreaIds[{index}]"),
                    "Common area selected more than once",
                );
            }
        }
        errors
    }

    fn into_fragment(value: Self::Value) -> StepFragment {
        StepFragment::CommonAreas(value)
    }
}
