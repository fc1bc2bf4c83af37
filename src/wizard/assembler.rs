//! Draft to wire payload transformation.
//!
//! [`assemble`] is total: it never fails and never invents defaults for
//! missing optional fields. It renames fields to the property contract,
//! copies the container coordinates onto every unit, and leaves
//! services/rules/common areas out entirely for complete rentals. Absent
//! and empty lists mean different things to the service on update.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Draft, HouseRule, MediaRef, NearbyInstitution, RentalMode, RoomType, ServiceOffering,
    UnitDraft,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rental_mode: Option<RentalMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_deposit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_contract: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_contract_months: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub nearby_institutions: Vec<NearbyInstitution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<ServiceOffering>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<HouseRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_area_ids: Option<Vec<Uuid>>,
    #[serde(default)]
    pub units: Vec<UnitPayload>,
    #[serde(default)]
    pub images: Vec<MediaRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<RoomType>,
    #[serde(default)]
    pub amenity_ids: Vec<Uuid>,
    #[serde(default)]
    pub images: Vec<MediaRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

pub fn assemble(draft: &Draft) -> PropertyPayload {
    let location = draft.location.as_ref();
    let coordinates = location.and_then(|loc| loc.coordinates);
    let by_unit = draft.effective_rental_mode().is_by_unit();

    let units = draft
        .units
        .iter()
        .map(|unit| assemble_unit(unit, coordinates.map(|c| (c.lat, c.lng))))
        .collect();

    PropertyPayload {
        title: draft.title.clone(),
        description: draft.description.clone(),
        property_type_id: draft.property_type_id,
        rental_mode: draft.rental_mode,
        requires_deposit: draft.requires_deposit,
        requires_contract: draft.requires_contract,
        min_contract_months: draft.min_contract_months,
        address: location.map(|loc| loc.street.clone()),
        neighborhood: location.and_then(|loc| loc.neighborhood.clone()),
        city_id: location.and_then(|loc| loc.city_id),
        department_id: location.and_then(|loc| loc.department_id),
        latitude: coordinates.map(|c| c.lat),
        longitude: coordinates.map(|c| c.lng),
        nearby_institutions: location
            .map(|loc| loc.nearby_institutions.clone())
            .unwrap_or_default(),
        services: by_unit.then(|| draft.services.clone()),
        rules: by_unit.then(|| draft.rules.clone()),
        common_area_ids: by_unit.then(|| draft.common_area_ids.clone()),
        units,
        images: draft.media.clone(),
    }
}

fn assemble_unit(unit: &UnitDraft, container: Option<(f64, f64)>) -> UnitPayload {
    UnitPayload {
        id: unit.id,
        title: unit.title.clone(),
        rent: unit.rent,
        area: unit.area,
        room_type: unit.room_type,
        amenity_ids: unit.amenities.clone(),
        images: unit.media.clone(),
        latitude: container.map(|(lat, _)| lat),
        longitude: container.map(|(_, lng)| lng),
    }
}
