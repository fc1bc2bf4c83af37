use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Coordinates, MediaRef, RoomType};

/// In-progress unit as edited by the unit builder.
///
/// `coordinates` may hold a stale value from an earlier edit; assembly always
/// replaces it with the container's coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitDraft {
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
    pub amenities: Vec<Uuid>,
    #[serde(default)]
    pub media: Vec<MediaRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl UnitDraft {
    pub fn new(title: impl Into<String>, rent: u64, room_type: RoomType) -> Self {
        Self {
            title: title.into(),
            rent: Some(rent),
            room_type: Some(room_type),
            ..Self::default()
        }
    }

    pub fn with_area(mut self, area: f64) -> Self {
        self.area = Some(area);
        self
    }
}
