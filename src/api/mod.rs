//! Boundary with the remote property service.
//!
//! The wizard only consumes the request/response contract below; the
//! HTTP implementation lives in [`http`].

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Amenity, Coordinates, Draft, LocationInfo, PropertyKind, UnitDraft};
use crate::wizard::PropertyPayload;

pub use http::HttpPropertyApi;

/// Errors from the property service boundary.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    /// The service rejected the request without an HTTP status, e.g. an
    /// embedded or in-process implementation.
    #[error("{0}")]
    Rejected(String),
}

/// Property entity as stored by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Uuid>,
    #[serde(flatten)]
    pub attributes: PropertyPayload,
}

/// Request/response contract of the property service.
#[async_trait]
pub trait PropertyApi: Send + Sync {
    async fn create_property(&self, payload: &PropertyPayload) -> Result<PropertyRecord, ApiError>;

    async fn update_property(
        &self,
        id: Uuid,
        payload: &PropertyPayload,
    ) -> Result<PropertyRecord, ApiError>;

    /// Creates a property on behalf of another account.
    async fn admin_create_property(
        &self,
        payload: &PropertyPayload,
        target_owner_id: Uuid,
    ) -> Result<PropertyRecord, ApiError>;

    async fn get_property(&self, id: Uuid) -> Result<PropertyRecord, ApiError>;

    async fn list_amenities(&self) -> Result<Vec<Amenity>, ApiError>;
}

impl From<PropertyRecord> for Draft {
    /// Seeds an edit flow from a stored property.
    fn from(record: PropertyRecord) -> Self {
        let attrs = record.attributes;
        let coordinates = match (attrs.latitude, attrs.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        };
        let location = attrs.address.map(|street| LocationInfo {
            street,
            neighborhood: attrs.neighborhood,
            city_id: attrs.city_id,
            department_id: attrs.department_id,
            coordinates,
            nearby_institutions: attrs.nearby_institutions,
        });
        let units = attrs
            .units
            .into_iter()
            .map(|unit| UnitDraft {
                id: unit.id,
                title: unit.title,
                rent: unit.rent,
                area: unit.area,
                room_type: unit.room_type,
                amenities: unit.amenity_ids,
                media: unit.images,
                coordinates: None,
            })
            .collect();

        Draft {
            id: Some(record.id),
            title: attrs.title,
            description: attrs.description,
            property_type_id: attrs.property_type_id,
            property_type_label: attrs
                .property_type_id
                .and_then(PropertyKind::from_classification_id)
                .map(|kind| kind.label().to_string()),
            rental_mode: attrs.rental_mode,
            requires_deposit: attrs.requires_deposit,
            requires_contract: attrs.requires_contract,
            min_contract_months: attrs.min_contract_months,
            location,
            services: attrs.services.unwrap_or_default(),
            rules: attrs.rules.unwrap_or_default(),
            common_area_ids: attrs.common_area_ids.unwrap_or_default(),
            units,
            media: attrs.images,
        }
    }
}
