use std::fmt;

use serde::{Deserialize, Serialize};

/// Property classification offered by the marketplace.
///
/// The wire code (`pension`, `apartamento`, ...) is what callers pass as the
/// pre-selected type and what the session snapshot stores; the numeric
/// classification id is what the property service expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Pension,
    Apartamento,
    Casa,
    Apartaestudio,
    Habitacion,
}

impl PropertyKind {
    pub const ALL: [PropertyKind; 5] = [
        PropertyKind::Pension,
        PropertyKind::Apartamento,
        PropertyKind::Casa,
        PropertyKind::Apartaestudio,
        PropertyKind::Habitacion,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::Pension => "pension",
            Self::Apartamento => "apartamento",
            Self::Casa => "casa",
            Self::Apartaestudio => "apartaestudio",
            Self::Habitacion => "habitacion",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == normalized)
    }

    /// Inverse of [`PropertyKind::classification_id`].
    pub fn from_classification_id(id: u32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.classification_id() == id)
    }

    /// Human label shown next to the classification.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pension => "Pensión",
            Self::Apartamento => "Apartamento",
            Self::Casa => "Casa",
            Self::Apartaestudio => "Apartaestudio",
            Self::Habitacion => "Habitación",
        }
    }

    /// Classification identifier understood by the property service.
    pub fn classification_id(self) -> u32 {
        match self {
            Self::Pension => 1,
            Self::Apartamento => 2,
            Self::Casa => 3,
            Self::Apartaestudio => 4,
            Self::Habitacion => 5,
        }
    }

    /// Rental mode pre-filled on the basic info step for this classification.
    pub fn default_rental_mode(self) -> RentalMode {
        match self {
            Self::Pension => RentalMode::ByUnit,
            _ => RentalMode::Complete,
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a container is rented room by room or as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalMode {
    #[default]
    ByUnit,
    Complete,
}

impl RentalMode {
    pub fn is_by_unit(self) -> bool {
        matches!(self, RentalMode::ByUnit)
    }

    pub fn label(self) -> &'static str {
        match self {
            RentalMode::ByUnit => "By unit",
            RentalMode::Complete => "Complete property",
        }
    }
}

/// Occupancy classification of a single unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Individual,
    Shared,
    Suite,
    Whole,
}

impl RoomType {
    pub const ALL: [RoomType; 4] = [
        RoomType::Individual,
        RoomType::Shared,
        RoomType::Suite,
        RoomType::Whole,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RoomType::Individual => "Individual",
            RoomType::Shared => "Shared",
            RoomType::Suite => "Suite",
            RoomType::Whole => "Whole property",
        }
    }
}
