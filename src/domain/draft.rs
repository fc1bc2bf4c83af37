use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    HouseRule, LocationInfo, MediaRef, PropertyKind, RentalMode, ServiceOffering, UnitDraft,
};

/// The aggregate accumulated across the wizard steps.
///
/// Every attribute is optional or defaults to an empty list because the
/// draft is filled one step at a time; only [`crate::wizard::assemble`]
/// turns it into the shape the property service receives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rental_mode: Option<RentalMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_deposit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_contract: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_contract_months: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationInfo>,
    #[serde(default)]
    pub services: Vec<ServiceOffering>,
    #[serde(default)]
    pub rules: Vec<HouseRule>,
    #[serde(default)]
    pub common_area_ids: Vec<Uuid>,
    #[serde(default)]
    pub units: Vec<UnitDraft>,
    #[serde(default)]
    pub media: Vec<MediaRef>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rental mode used by the transition table. Until the basic info step
    /// has been confirmed the draft is treated as `by_unit`.
    pub fn effective_rental_mode(&self) -> RentalMode {
        self.rental_mode.unwrap_or_default()
    }
}

/// Output of the basic info step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfoFragment {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub rental_mode: RentalMode,
    pub requires_deposit: bool,
    pub requires_contract: bool,
    #[serde(default)]
    pub min_contract_months: Option<u32>,
    #[serde(default)]
    pub property_type_id: Option<u32>,
    #[serde(default)]
    pub property_type_label: Option<String>,
}

/// Step-scoped data emitted by a step form on confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum StepFragment {
    BasicInfo(BasicInfoFragment),
    Location(LocationInfo),
    Services(Vec<ServiceOffering>),
    Rules(Vec<HouseRule>),
    CommonAreas(Vec<Uuid>),
    Units(Vec<UnitDraft>),
    Media(Vec<MediaRef>),
}

/// Shallow merge: every key the fragment carries replaces the draft's value.
pub fn merge_fragment(mut draft: Draft, fragment: StepFragment) -> Draft {
    match fragment {
        StepFragment::BasicInfo(basic) => {
            draft.title = Some(basic.title);
            draft.description = basic.description;
            draft.rental_mode = Some(basic.rental_mode);
            draft.requires_deposit = Some(basic.requires_deposit);
            draft.requires_contract = Some(basic.requires_contract);
            draft.min_contract_months = basic.min_contract_months;
            if basic.property_type_id.is_some() {
                draft.property_type_id = basic.property_type_id;
            }
            if basic.property_type_label.is_some() {
                draft.property_type_label = basic.property_type_label;
            }
        }
        StepFragment::Location(location) => draft.location = Some(location),
        StepFragment::Services(services) => draft.services = services,
        StepFragment::Rules(rules) => draft.rules = rules,
        StepFragment::CommonAreas(ids) => draft.common_area_ids = ids,
        StepFragment::Units(units) => draft.units = units,
        StepFragment::Media(media) => draft.media = media,
    }
    draft
}

/// Re-derives the classification from the selected property type. A
/// selected type always wins over whatever a merge left behind.
pub fn apply_classification(draft: &mut Draft, selected: Option<PropertyKind>) {
    if let Some(kind) = selected {
        draft.property_type_id = Some(kind.classification_id());
        draft.property_type_label = Some(kind.label().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RoomType, ServiceKind};

    fn basic(title: &str, mode: RentalMode) -> BasicInfoFragment {
        BasicInfoFragment {
            title: title.into(),
            description: None,
            rental_mode: mode,
            requires_deposit: true,
            requires_contract: false,
            min_contract_months: None,
            property_type_id: None,
            property_type_label: None,
        }
    }

    #[test]
    fn merge_overwrites_only_the_fragment_keys() {
        let mut draft = Draft::new();
        draft.services = vec![ServiceOffering::included(ServiceKind::Wifi)];
        draft.units = vec![UnitDraft::new("Room 1", 400_000, RoomType::Individual)];

        let merged = merge_fragment(
            draft,
            StepFragment::BasicInfo(basic("Casa Azul", RentalMode::ByUnit)),
        );

        assert_eq!(merged.title.as_deref(), Some("Casa Azul"));
        assert_eq!(merged.rental_mode, Some(RentalMode::ByUnit));
        assert_eq!(merged.services.len(), 1);
        assert_eq!(merged.units.len(), 1);
    }

    #[test]
    fn list_fragments_replace_instead_of_append() {
        let mut draft = Draft::new();
        draft.services = vec![
            ServiceOffering::included(ServiceKind::Wifi),
            ServiceOffering::included(ServiceKind::Gas),
        ];
        let merged = merge_fragment(
            draft,
            StepFragment::Services(vec![ServiceOffering::included(ServiceKind::Water)]),
        );
        assert_eq!(merged.services, vec![ServiceOffering::included(ServiceKind::Water)]);
    }

    #[test]
    fn selected_type_overrides_merged_classification() {
        let mut fragment = basic("Stale", RentalMode::Complete);
        fragment.property_type_id = Some(99);
        fragment.property_type_label = Some("Old".into());

        let mut draft = merge_fragment(Draft::new(), StepFragment::BasicInfo(fragment));
        assert_eq!(draft.property_type_id, Some(99));

        apply_classification(&mut draft, Some(PropertyKind::Pension));
        assert_eq!(draft.property_type_id, Some(1));
        assert_eq!(draft.property_type_label.as_deref(), Some("Pensión"));
    }

    #[test]
    fn missing_rental_mode_defaults_to_by_unit() {
        assert_eq!(Draft::new().effective_rental_mode(), RentalMode::ByUnit);
    }
}
