mod common;

use std::fs;

use common::{basic_info, location};
use listing_wizard::{
    domain::{
        Coordinates, Draft, HouseRule, LocationInfo, MediaRef, NearbyInstitution, PropertyKind,
        RentalMode, RoomType, RuleKind, RuleValue, ServiceKind, ServiceOffering, UnitDraft,
    },
    wizard::{
        DraftPersistence, DraftSnapshot, DraftStore, FlowProps, JsonFileDraftStore,
        MemoryDraftStore, WizardController, WizardStep, CONTAINER_FLOW_DRAFT_KEY,
    },
};
use tempfile::tempdir;
use uuid::Uuid;

fn draft_with_lists(len: usize) -> Draft {
    let services = ServiceKind::ALL
        .iter()
        .take(len)
        .map(|kind| ServiceOffering {
            kind: *kind,
            included: false,
            surcharge: Some(25_000),
            note: Some("por mes".into()),
        })
        .collect();
    let rules = (0..len)
        .map(|index| HouseRule {
            kind: RuleKind::ALL[index],
            value: if RuleKind::ALL[index].takes_flag() {
                RuleValue::Allowed(index % 2 == 0)
            } else {
                RuleValue::Text("22:00".into())
            },
            note: None,
        })
        .collect();
    let units = (0..len)
        .map(|index| {
            let mut unit = UnitDraft::new(format!("Room {index}"), 400_000 + index as u64, RoomType::Shared)
                .with_area(12.7 + index as f64);
            unit.amenities = vec![Uuid::new_v4()];
            unit.media = vec![MediaRef::cover(format!("https://cdn/{index}.jpg"))];
            unit.coordinates = Some(Coordinates::new(0.1, 0.2));
            unit
        })
        .collect();

    Draft {
        title: Some("Pensión Las Palmas".into()),
        description: Some("Habitaciones amobladas".into()),
        property_type_id: Some(1),
        property_type_label: Some("Pensión".into()),
        rental_mode: Some(RentalMode::ByUnit),
        requires_deposit: Some(true),
        requires_contract: Some(true),
        min_contract_months: Some(6),
        location: Some(LocationInfo {
            street: "Calle 50 # 10-20".into(),
            neighborhood: None,
            city_id: Some(11001),
            department_id: Some(11),
            coordinates: Some(Coordinates::new(4.609_710_3, -74.081_749_1)),
            nearby_institutions: vec![NearbyInstitution {
                institution_id: Uuid::new_v4(),
                distance_meters: Some(350),
            }],
        }),
        services,
        rules,
        common_area_ids: (0..len).map(|_| Uuid::new_v4()).collect(),
        units,
        media: vec![MediaRef::new("https://cdn/front.jpg")],
        ..Draft::default()
    }
}

#[test]
fn snapshot_round_trips_for_list_lengths() {
    for len in [0, 1, 3] {
        let store = MemoryDraftStore::new();
        let persistence = DraftPersistence::new(Box::new(store), false);
        let draft = draft_with_lists(len);

        assert!(persistence.save(WizardStep::Rules, &draft, Some(PropertyKind::Pension), false));
        let snapshot = persistence.load().expect("snapshot present");

        assert_eq!(snapshot.wizard_step(), Some(WizardStep::Rules));
        assert_eq!(snapshot.data, draft, "list length {len}");
        assert_eq!(snapshot.selected_property_type, Some(PropertyKind::Pension));
    }
}

#[test]
fn snapshot_json_uses_the_shared_shape() {
    let store = MemoryDraftStore::new();
    let persistence = DraftPersistence::new(Box::new(store.clone()), false);
    persistence.save(
        WizardStep::Services,
        &Draft::default(),
        Some(PropertyKind::Pension),
        false,
    );

    let raw = store.raw(CONTAINER_FLOW_DRAFT_KEY).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["step"], 3);
    assert_eq!(value["selectedPropertyType"], "pension");
    assert!(value["data"].is_object());
    assert!(value["savedAt"].is_string());
}

#[test]
fn resume_wins_over_initial_property_type() {
    let store = MemoryDraftStore::new();
    let stored = Draft {
        title: Some("Pensión guardada".into()),
        rental_mode: Some(RentalMode::ByUnit),
        ..Draft::default()
    };
    let snapshot = DraftSnapshot::new(WizardStep::Services, stored.clone(), Some(PropertyKind::Pension));
    store
        .write(CONTAINER_FLOW_DRAFT_KEY, &serde_json::to_string(&snapshot).unwrap())
        .unwrap();

    let props = FlowProps::create().with_property_type(PropertyKind::Casa);
    let wizard = WizardController::mount(props, None, Box::new(store));

    assert_eq!(wizard.step(), WizardStep::Services);
    assert_eq!(wizard.step().index(), 3);
    assert_eq!(wizard.selected_type(), Some(PropertyKind::Pension));
    assert_eq!(wizard.draft().title, stored.title);
    assert_eq!(wizard.draft().property_type_id, Some(1));
    assert!(wizard.can_retreat());
}

#[test]
fn every_navigation_is_persisted() {
    let store = MemoryDraftStore::new();
    let mut wizard =
        WizardController::mount(FlowProps::create(), None, Box::new(store.clone()));
    wizard.select_type(PropertyKind::Pension).unwrap();
    wizard
        .advance(basic_info("Pensión Centro", RentalMode::ByUnit))
        .unwrap();
    wizard.advance(location()).unwrap();

    let raw = store.raw(CONTAINER_FLOW_DRAFT_KEY).unwrap();
    let snapshot: DraftSnapshot = serde_json::from_str(&raw).unwrap();
    assert_eq!(snapshot.wizard_step(), Some(WizardStep::Services));
    assert_eq!(&snapshot.data, wizard.draft());

    wizard.retreat().unwrap();
    let raw = store.raw(CONTAINER_FLOW_DRAFT_KEY).unwrap();
    let snapshot: DraftSnapshot = serde_json::from_str(&raw).unwrap();
    assert_eq!(snapshot.wizard_step(), Some(WizardStep::Location));
}

#[test]
fn edit_mode_never_reads_or_writes_the_snapshot() {
    let store = MemoryDraftStore::new();
    let other = DraftSnapshot::new(WizardStep::Rules, Draft::default(), None);
    let raw = serde_json::to_string(&other).unwrap();
    store.write(CONTAINER_FLOW_DRAFT_KEY, &raw).unwrap();

    let mut wizard = WizardController::mount(
        FlowProps::edit(Uuid::new_v4()),
        Some(Draft::default()),
        Box::new(store.clone()),
    );
    assert_eq!(wizard.step(), WizardStep::BasicInfo);
    wizard
        .advance(basic_info("Editada", RentalMode::Complete))
        .unwrap();

    assert_eq!(store.raw(CONTAINER_FLOW_DRAFT_KEY), Some(raw));
}

#[test]
fn corrupt_snapshot_is_discarded() {
    let store = MemoryDraftStore::new();
    store.write(CONTAINER_FLOW_DRAFT_KEY, "{not json").unwrap();

    let wizard = WizardController::mount(FlowProps::create(), None, Box::new(store.clone()));
    assert_eq!(wizard.step(), WizardStep::TypeSelection);
    assert_eq!(store.raw(CONTAINER_FLOW_DRAFT_KEY), None);
}

#[test]
fn file_store_writes_atomically_under_the_session_dir() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("sessions").join("tab-1");
    let store = JsonFileDraftStore::new(&dir).unwrap();
    let path = store.path_for(CONTAINER_FLOW_DRAFT_KEY);

    let persistence = DraftPersistence::new(Box::new(store), false);
    let draft = draft_with_lists(2);
    assert!(persistence.save(WizardStep::UnitBuilder, &draft, None, false));

    assert!(path.starts_with(&dir));
    assert!(path.exists());
    let leftovers: Vec<_> = fs::read_dir(&dir)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.path().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());

    let snapshot = persistence.load().unwrap();
    assert_eq!(snapshot.data, draft);

    persistence.clear();
    assert!(!path.exists());
    assert!(persistence.load().is_none());
}
