use std::collections::HashSet;

use crate::domain::{Draft, HouseRule, RuleValue, StepFragment};
use crate::wizard::WizardStep;

use super::form::{is_blank, too_long};
use super::{sanitize_note, FieldErrors, StepForm};

const NOTE_MAX: usize = 200;

pub struct RulesForm;

impl StepForm for RulesForm {
    const STEP: WizardStep = WizardStep::Rules;
    type Value = Vec<HouseRule>;

    fn initial(draft: &Draft) -> Self::Value {
        draft.rules.clone()
    }

    fn validate(value: &Self::Value) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let mut seen = HashSet::new();
        for (index, rule) in value.iter().enumerate() {
            let field = format!("rules[{index}]");
            if !seen.insert(rule.kind) {
                errors.add(
                    field.clone(),
                    format!("{} is listed more than once", rule.kind.label()),
                );
            }
            match (&rule.value, rule.kind.takes_flag()) {
                (RuleValue::Allowed(_), true) => {}
                (RuleValue::Text(text), false) if !is_blank(text) => {}
                (RuleValue::Text(_), false) => {
                    errors.add(format!("{field}.value"), "Enter a value for this rule")
                }
                (RuleValue::Text(_), true) => errors.add(
                    format!("{field}.value"),
                    format!("{} is answered with allowed or not allowed", rule.kind.label()),
                ),
                (RuleValue::Allowed(_), false) => errors.add(
                    format!("{field}.value"),
                    format!("{} needs a written value", rule.kind.label()),
                ),
            }
            if rule
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
        let rules = value
            .into_iter()
            .map(|rule| HouseRule {
                value: match rule.value {
                    RuleValue::Text(text) => RuleValue::Text(text.trim().to_string()),
                    flag => flag,
                },
                note: sanitize_note(rule.note.as_deref()),
                kind: rule.kind,
            })
            .collect();
        StepFragment::Rules(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RuleKind;

    #[test]
    fn value_shape_must_match_rule_kind() {
        let rules = vec![
            HouseRule {
                kind: RuleKind::Pets,
                value: RuleValue::Text("small dogs".into()),
                note: None,
            },
            HouseRule {
                kind: RuleKind::QuietHours,
                value: RuleValue::Allowed(true),
                note: None,
            },
            HouseRule {
                kind: RuleKind::Curfew,
                value: RuleValue::Text("  ".into()),
                note: None,
            },
        ];
        let errors = RulesForm::validate(&rules);
        assert!(errors.contains("rules[0].value"));
        assert!(errors.contains("rules[1].value"));
        assert!(errors.contains("rules[2].value"));
    }

    #[test]
    fn text_values_are_trimmed_on_confirm() {
        let rules = vec![HouseRule {
            kind: RuleKind::QuietHours,
            value: RuleValue::Text(" 22:00 - 06:00 ".into()),
            note: Some(String::new()),
        }];
        let StepFragment::Rules(rules) = RulesForm::confirm(rules).unwrap() else {
            panic!("expected rules fragment");
        };
        assert_eq!(rules[0].value, RuleValue::Text("22:00 - 06:00".into()));
        assert_eq!(rules[0].note, None);
    }
}
