use insta::assert_snapshot;
use listing_wizard::{
    domain::{
        Coordinates, Draft, HouseRule, LocationInfo, MediaRef, RentalMode, RoomType, RuleKind,
        RuleValue, ServiceKind, ServiceOffering, UnitDraft,
    },
    wizard::assemble,
};
use uuid::Uuid;

fn stale_complete_draft() -> Draft {
    Draft {
        title: Some("Apartamento 301".into()),
        property_type_id: Some(2),
        rental_mode: Some(RentalMode::Complete),
        location: Some(LocationInfo {
            street: "Carrera 43A # 1-50".into(),
            city_id: Some(5001),
            coordinates: Some(Coordinates::new(6.25, -75.5)),
            ..LocationInfo::default()
        }),
        // Left over from an earlier by-unit pass through the flow.
        services: vec![ServiceOffering::included(ServiceKind::Wifi)],
        rules: vec![HouseRule {
            kind: RuleKind::Pets,
            value: RuleValue::Allowed(false),
            note: None,
        }],
        common_area_ids: vec![Uuid::new_v4()],
        units: vec![UnitDraft::new("Apartamento completo", 1_800_000, RoomType::Whole)],
        ..Draft::default()
    }
}

#[test]
fn complete_rental_never_sends_container_lists() {
    let value = serde_json::to_value(assemble(&stale_complete_draft())).unwrap();
    let object = value.as_object().unwrap();
    assert!(!object.contains_key("services"));
    assert!(!object.contains_key("rules"));
    assert!(!object.contains_key("commonAreaIds"));
}

#[test]
fn by_unit_keeps_container_lists() {
    let mut draft = stale_complete_draft();
    draft.rental_mode = Some(RentalMode::ByUnit);
    let value = serde_json::to_value(assemble(&draft)).unwrap();
    assert_eq!(value["services"][0]["kind"], "wifi");
    assert_eq!(value["rules"].as_array().unwrap().len(), 1);
    assert_eq!(value["commonAreaIds"].as_array().unwrap().len(), 1);
}

#[test]
fn unit_coordinates_follow_the_container() {
    let mut draft = stale_complete_draft();
    draft.rental_mode = Some(RentalMode::ByUnit);
    let mut stale = UnitDraft::new("Room 2", 500_000, RoomType::Suite);
    stale.coordinates = Some(Coordinates::new(-33.0, 151.0));
    draft.units.push(stale);
    draft.units.push(UnitDraft::new("Room 3", 450_000, RoomType::Shared));

    let payload = assemble(&draft);
    assert_eq!(payload.units.len(), 3);
    for unit in &payload.units {
        assert_eq!(unit.latitude, Some(6.25));
        assert_eq!(unit.longitude, Some(-75.5));
    }
}

#[test]
fn assemble_is_pure() {
    let draft = stale_complete_draft();
    let copy = draft.clone();
    assert_eq!(assemble(&draft), assemble(&draft));
    assert_eq!(draft, copy);
}

#[test]
fn wire_shape_of_a_complete_rental() {
    let mut draft = stale_complete_draft();
    draft.common_area_ids.clear();
    draft.media = vec![MediaRef::cover("https://cdn.example.test/sala.jpg")];
    let json = serde_json::to_string_pretty(&assemble(&draft)).unwrap();

    assert_snapshot!(json, @r###"
    {
      "title": "Apartamento 301",
      "propertyTypeId": 2,
      "rentalMode": "complete",
      "address": "Carrera 43A # 1-50",
      "cityId": 5001,
      "latitude": 6.25,
      "longitude": -75.5,
      "nearbyInstitutions": [],
      "units": [
        {
          "title": "Apartamento completo",
          "rent": 1800000,
          "roomType": "whole",
          "amenityIds": [],
          "images": [],
          "latitude": 6.25,
          "longitude": -75.5
        }
      ],
      "images": [
        {
          "url": "https://cdn.example.test/sala.jpg",
          "isCover": true
        }
      ]
    }
    "###);
}
