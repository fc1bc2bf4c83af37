use crate::domain::{BasicInfoFragment, Draft, RentalMode, StepFragment};
use crate::wizard::WizardStep;

use super::form::{is_blank, sanitize_note, too_long};
use super::{FieldErrors, StepForm};

const TITLE_MAX: usize = 120;
const DESCRIPTION_MAX: usize = 2000;

/// Raw values collected by the basic info step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicInfoInput {
    pub title: String,
    pub description: String,
    pub rental_mode: Option<RentalMode>,
    pub requires_deposit: bool,
    pub requires_contract: bool,
    pub min_contract_months: Option<u32>,
}

pub struct BasicInfoForm;

impl StepForm for BasicInfoForm {
    const STEP: WizardStep = WizardStep::BasicInfo;
    type Value = BasicInfoInput;

    fn initial(draft: &Draft) -> Self::Value {
        BasicInfoInput {
            title: draft.title.clone().unwrap_or_default(),
            description: draft.description.clone().unwrap_or_default(),
            rental_mode: draft.rental_mode,
            requires_deposit: draft.requires_deposit.unwrap_or(false),
            requires_contract: draft.requires_contract.unwrap_or(false),
            min_contract_months: draft.min_contract_months,
        }
    }

    fn validate(value: &Self::Value) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if is_blank(&value.title) {
            errors.add("title", "Title is required");
        } else if too_long(value.title.trim(), TITLE_MAX) {
            errors.add("title", format!("Title must be at most {TITLE_MAX} characters"));
        }
        if too_long(value.description.trim(), DESCRIPTION_MAX) {
            errors.add(
                "description",
                format!("Description must be at most {DESCRIPTION_MAX} characters"),
            );
        }
        if value.rental_mode.is_none() {
            errors.add("rentalMode", "Choose how the property is rented");
        }
        if value.requires_contract && !matches!(value.min_contract_months, Some(months) if months > 0)
        {
            errors.add("minContractMonths", "Enter the minimum contract length in months");
        }
        errors
    }

    fn into_fragment(value: Self::Value) -> StepFragment {
        StepFragment::BasicInfo(BasicInfoFragment {
            title: value.title.trim().to_string(),
            description: sanitize_note(Some(&value.description)),
            rental_mode: value.rental_mode.unwrap_or_default(),
            requires_deposit: value.requires_deposit,
            requires_contract: value.requires_contract,
            min_contract_months: if value.requires_contract {
                value.min_contract_months
            } else {
                None
            },
            property_type_id: None,
            property_type_label: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> BasicInfoInput {
        BasicInfoInput {
            title: "  Pensión Los Andes ".into(),
            description: String::new(),
            rental_mode: Some(RentalMode::ByUnit),
            requires_deposit: true,
            requires_contract: false,
            min_contract_months: Some(6),
        }
    }

    #[test]
    fn confirm_trims_and_drops_unused_contract_term() {
        let fragment = BasicInfoForm::confirm(valid_input()).expect("valid input");
        let StepFragment::BasicInfo(basic) = fragment else {
            panic!("expected basic info fragment");
        };
        assert_eq!(basic.title, "Pensión Los Andes");
        assert_eq!(basic.description, None);
        assert_eq!(basic.min_contract_months, None);
    }

    #[test]
    fn missing_title_and_mode_are_reported_per_field() {
        let input = BasicInfoInput {
            title: "   ".into(),
            ..BasicInfoInput::default()
        };
        let errors = BasicInfoForm::confirm(input).unwrap_err();
        assert!(errors.contains("title"));
        assert!(errors.contains("rentalMode"));
    }

    #[test]
    fn contract_requires_positive_months() {
        let input = BasicInfoInput {
            requires_contract: true,
            min_contract_months: Some(0),
            ..valid_input()
        };
        let errors = BasicInfoForm::validate(&input);
        assert!(errors.contains("minContractMonths"));
    }
}
