//! Container-level configuration vocabularies: services, house rules and the
//! amenity directory entries published by the property service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    Wifi,
    Water,
    Electricity,
    Gas,
    Laundry,
    Cleaning,
    Meals,
    Parking,
    Television,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 9] = [
        ServiceKind::Wifi,
        ServiceKind::Water,
        ServiceKind::Electricity,
        ServiceKind::Gas,
        ServiceKind::Laundry,
        ServiceKind::Cleaning,
        ServiceKind::Meals,
        ServiceKind::Parking,
        ServiceKind::Television,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ServiceKind::Wifi => "Wi-Fi",
            ServiceKind::Water => "Water",
            ServiceKind::Electricity => "Electricity",
            ServiceKind::Gas => "Gas",
            ServiceKind::Laundry => "Laundry",
            ServiceKind::Cleaning => "Cleaning",
            ServiceKind::Meals => "Meals",
            ServiceKind::Parking => "Parking",
            ServiceKind::Television => "Television",
        }
    }
}

/// One service the container offers to its tenants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOffering {
    pub kind: ServiceKind,
    pub included: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surcharge: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ServiceOffering {
    pub fn included(kind: ServiceKind) -> Self {
        Self {
            kind,
            included: true,
            surcharge: None,
            note: None,
        }
    }
}

/// House rule vocabulary. Flag rules are answered with allowed/disallowed,
/// the rest carry a free-text value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Pets,
    Smoking,
    Visits,
    Parties,
    Couples,
    QuietHours,
    Curfew,
    MinimumStay,
}

impl RuleKind {
    pub const ALL: [RuleKind; 8] = [
        RuleKind::Pets,
        RuleKind::Smoking,
        RuleKind::Visits,
        RuleKind::Parties,
        RuleKind::Couples,
        RuleKind::QuietHours,
        RuleKind::Curfew,
        RuleKind::MinimumStay,
    ];

    pub fn takes_flag(self) -> bool {
        matches!(
            self,
            RuleKind::Pets
                | RuleKind::Smoking
                | RuleKind::Visits
                | RuleKind::Parties
                | RuleKind::Couples
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            RuleKind::Pets => "Pets",
            RuleKind::Smoking => "Smoking",
            RuleKind::Visits => "Visits",
            RuleKind::Parties => "Parties",
            RuleKind::Couples => "Couples",
            RuleKind::QuietHours => "Quiet hours",
            RuleKind::Curfew => "Curfew",
            RuleKind::MinimumStay => "Minimum stay",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "value")]
pub enum RuleValue {
    Allowed(bool),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseRule {
    pub kind: RuleKind,
    pub value: RuleValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Entry of the amenities directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amenity {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}
