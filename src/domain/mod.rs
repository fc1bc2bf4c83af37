//! Listing domain records collected by the submission wizard.

pub mod draft;
pub mod location;
pub mod media;
pub mod offerings;
pub mod property;
pub mod unit;

pub use draft::{apply_classification, merge_fragment, BasicInfoFragment, Draft, StepFragment};
pub use location::{Coordinates, LocationInfo, NearbyInstitution};
pub use media::MediaRef;
pub use offerings::{Amenity, HouseRule, RuleKind, RuleValue, ServiceKind, ServiceOffering};
pub use property::{PropertyKind, RentalMode, RoomType};
pub use unit::UnitDraft;
