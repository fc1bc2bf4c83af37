#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;
use listing_wizard::{
    api::{ApiError, PropertyApi, PropertyRecord},
    domain::{
        Amenity, BasicInfoFragment, Coordinates, LocationInfo, MediaRef, RentalMode, RoomType,
        StepFragment, UnitDraft,
    },
    wizard::PropertyPayload,
};
use uuid::Uuid;

/// Write recorded by [`FakePropertyApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(PropertyPayload),
    Update(Uuid, PropertyPayload),
    AdminCreate(PropertyPayload, Uuid),
    Get(Uuid),
    ListAmenities,
}

/// In-memory property service that records every call.
#[derive(Clone, Default)]
pub struct FakePropertyApi {
    calls: Arc<Mutex<Vec<Call>>>,
    fail_next: Arc<Mutex<Option<String>>>,
    amenities: Vec<Amenity>,
    amenity_gate: Option<Arc<Notify>>,
    stored: Option<PropertyRecord>,
}

impl FakePropertyApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_amenities(mut self, amenities: Vec<Amenity>) -> Self {
        self.amenities = amenities;
        self
    }

    /// Holds `list_amenities` until `gate` is notified.
    pub fn with_amenity_gate(mut self, gate: Arc<Notify>) -> Self {
        self.amenity_gate = Some(gate);
        self
    }

    pub fn with_stored(mut self, record: PropertyRecord) -> Self {
        self.stored = Some(record);
        self
    }

    /// Makes the next write fail with a 422 carrying `message`.
    pub fn fail_next(&self, message: &str) {
        *self.fail_next.lock().unwrap() = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, Call::Get(_) | Call::ListAmenities))
            .collect()
    }

    fn write(&self, call: Call, payload: &PropertyPayload, id: Uuid) -> Result<PropertyRecord, ApiError> {
        self.calls.lock().unwrap().push(call);
        if let Some(message) = self.fail_next.lock().unwrap().take() {
            return Err(ApiError::Status {
                status: 422,
                message,
            });
        }
        Ok(PropertyRecord {
            id,
            owner_id: None,
            attributes: payload.clone(),
        })
    }
}

#[async_trait]
impl PropertyApi for FakePropertyApi {
    async fn create_property(&self, payload: &PropertyPayload) -> Result<PropertyRecord, ApiError> {
        self.write(Call::Create(payload.clone()), payload, Uuid::new_v4())
    }

    async fn update_property(
        &self,
        id: Uuid,
        payload: &PropertyPayload,
    ) -> Result<PropertyRecord, ApiError> {
        self.write(Call::Update(id, payload.clone()), payload, id)
    }

    async fn admin_create_property(
        &self,
        payload: &PropertyPayload,
        target_owner_id: Uuid,
    ) -> Result<PropertyRecord, ApiError> {
        self.write(
            Call::AdminCreate(payload.clone(), target_owner_id),
            payload,
            Uuid::new_v4(),
        )
    }

    async fn get_property(&self, id: Uuid) -> Result<PropertyRecord, ApiError> {
        self.calls.lock().unwrap().push(Call::Get(id));
        self.stored
            .clone()
            .filter(|record| record.id == id)
            .ok_or_else(|| ApiError::Status {
                status: 404,
                message: "Property not found".into(),
            })
    }

    async fn list_amenities(&self) -> Result<Vec<Amenity>, ApiError> {
        self.calls.lock().unwrap().push(Call::ListAmenities);
        if let Some(gate) = &self.amenity_gate {
            gate.notified().await;
        }
        if self.amenities.is_empty() {
            return Err(ApiError::Rejected("amenities unavailable".into()));
        }
        Ok(self.amenities.clone())
    }
}

pub fn basic_info(title: &str, mode: RentalMode) -> StepFragment {
    StepFragment::BasicInfo(BasicInfoFragment {
        title: title.into(),
        description: Some("Cerca de la universidad".into()),
        rental_mode: mode,
        requires_deposit: true,
        requires_contract: false,
        min_contract_months: None,
        property_type_id: None,
        property_type_label: None,
    })
}

pub fn location() -> StepFragment {
    StepFragment::Location(LocationInfo {
        street: "Calle 10 # 43-12".into(),
        neighborhood: Some("El Poblado".into()),
        city_id: Some(5001),
        department_id: Some(5),
        coordinates: Some(Coordinates::new(6.2088, -75.5673)),
        nearby_institutions: Vec::new(),
    })
}

pub fn room(title: &str, rent: u64) -> UnitDraft {
    UnitDraft::new(title, rent, RoomType::Individual)
}

pub fn units(units: Vec<UnitDraft>) -> StepFragment {
    StepFragment::Units(units)
}

pub fn gallery() -> StepFragment {
    StepFragment::Media(vec![MediaRef::cover("https://cdn.example.test/front.jpg")])
}
