use std::collections::HashSet;

use crate::domain::{Draft, LocationInfo, StepFragment};
use crate::wizard::WizardStep;

use super::form::is_blank;
use super::{sanitize_note, FieldErrors, StepForm};

pub struct LocationForm;

impl StepForm for LocationForm {
    const STEP: WizardStep = WizardStep::Location;
    type Value = LocationInfo;

    fn initial(draft: &Draft) -> Self::Value {
        draft.location.clone().unwrap_or_default()
    }

    fn validate(value: &Self::Value) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if is_blank(&value.street) {
            errors.add("street", "Street address is required");
        }
        if value.city_id.is_none() {
            errors.add("cityId", "Select a city");
        }
        match value.coordinates {
            None => errors.add("coordinates", "Place the property on the map"),
            Some(point) if !point.is_valid() => {
                errors.add("coordinates", "Coordinates are out of range")
            }
            Some(_) => {}
        }

        let mut seen = HashSet::new();
        for (index, nearby) in value.nearby_institutions.iter().enumerate() {
            if !seen.insert(nearby.institution_id) {
                errors.add(
                    format!("nearbyInstitutions[{index}]"),
                    "Institution listed more than once",
                );
            }
            if nearby.distance_meters == Some(0) {
                errors.add(
                    format!("nearbyInstitutions[{index}].distanceMeters"),
                    "Distance must be greater than zero",
                );
            }
        }
        errors
    }

    fn into_fragment(mut value: Self::Value) -> StepFragment {
        value.street = value.street.trim().to_string();
        value.neighborhood = sanitize_note(value.neighborhood.as_deref());
        StepFragment::Location(value)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::domain::{Coordinates, NearbyInstitution};

    fn bogota() -> LocationInfo {
        LocationInfo {
            street: "Calle 45 # 13-20".into(),
            neighborhood: Some("  ".into()),
            city_id: Some(11001),
            department_id: Some(11),
            coordinates: Some(Coordinates::new(4.6321, -74.0659)),
            nearby_institutions: Vec::new(),
        }
    }

    #[test]
    fn valid_location_drops_blank_neighborhood() {
        let StepFragment::Location(location) = LocationForm::confirm(bogota()).unwrap() else {
            panic!("expected location fragment");
        };
        assert_eq!(location.neighborhood, None);
    }

    #[test]
    fn missing_coordinates_block_the_step() {
        let mut input = bogota();
        input.coordinates = None;
        let errors = LocationForm::validate(&input);
        assert!(errors.contains("coordinates"));
    }

    #[test]
    fn duplicate_institutions_are_flagged() {
        let id = Uuid::new_v4();
        let mut input = bogota();
        input.nearby_institutions = vec![
            NearbyInstitution {
                institution_id: id,
                distance_meters: Some(300),
            },
            NearbyInstitution {
                institution_id: id,
                distance_meters: Some(0),
            },
        ];
        let errors = LocationForm::validate(&input);
        assert!(errors.contains("nearbyInstitutions[1]"));
        assert!(errors.contains("nearbyInstitutions[1].distanceMeters"));
    }
}
