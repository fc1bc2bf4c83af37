use std::collections::HashSet;

use crate::domain::{Draft, ServiceOffering, StepFragment};
use crate::wizard::WizardStep;

use super::form::too_long;
use super::{sanitize_note, FieldErrors, StepForm};

const NOTE_MAX: usize = 200;

pub struct ServicesForm;

impl StepForm for ServicesForm {
    const STEP: WizardStep = WizardStep::Services;
    type Value = Vec<ServiceOffering>;

    fn initial(draft: &Draft) -> Self::Value {
        draft.services.clone()
    }

    fn validate(value: &Self::Value) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let mut seen = HashSet::new();
        for (index, service) in value.iter().enumerate() {
            let field = format!("services[{index}]");
            if !seen.insert(service.kind) {
                errors.add(
                    field.clone(),
                    format!("{} is listed more than once", service.kind.label()),
                );
            }
            match service.surcharge {
                Some(0) => errors.add(
                    format!("{field}.surcharge"),
                    "Surcharge must be greater than zero",
                ),
                Some(_) if service.included => errors.add(
                    format!("{field}.surcharge"),
                    "Included services cannot carry a surcharge",
                ),
                _ => {}
            }
            if service
                .note
                .as_deref()
                .map(|note| too_long(note.trim(), NOTE_MAX))
                .unwrap_or(false)
            {
                errors.add(
                    format!("{field}.note"),
                    format!("Notes must be at most {NOTE_MAX} characters"),
                );
            }
        }
        errors
    }

    fn into_fragment(value: Self::Value) -> StepFragment {
        let services = value
            .into_iter()
            .map(|service| ServiceOffering {
                note: sanitize_note(service.note.as_deref()),
                ..service
            })
            .collect();
        StepFragment::Services(services)
    }
}
