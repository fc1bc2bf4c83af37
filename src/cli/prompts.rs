//! dialoguer prompts for each wizard step.
//!
//! Prompts only collect raw values. Validation and navigation stay with
//! the step forms and the controller.

use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};
use uuid::Uuid;

use crate::domain::{
    Amenity, Coordinates, HouseRule, LocationInfo, MediaRef, PropertyKind, RentalMode, RoomType,
    RuleKind, RuleValue, ServiceKind, ServiceOffering, UnitDraft,
};
use crate::steps::{BasicInfoInput, Validator};

use super::CliError;

const FLAG_CHOICES: [&str; 3] = ["No rule", "Allowed", "Not allowed"];

/// What the user chose to do with a step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepAction<T> {
    Submit(T),
    Back,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nav {
    Continue,
    Back,
    Cancel,
}

/// Actions offered by the unit builder menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitMenu {
    Add,
    Edit(usize),
    Remove(usize),
    Finish,
    Back,
    Cancel,
}

fn nav_menu(theme: &ColorfulTheme, can_back: bool, continue_label: &str) -> Result<Nav, CliError> {
    let mut items = vec![(continue_label, Nav::Continue)];
    if can_back {
        items.push(("Back", Nav::Back));
    }
    items.push(("Cancel", Nav::Cancel));
    let labels: Vec<&str> = items.iter().map(|(label, _)| *label).collect();
    let index = Select::with_theme(theme)
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(items[index].1)
}

fn finish<T>(nav: Nav, value: T) -> StepAction<T> {
    match nav {
        Nav::Continue => StepAction::Submit(value),
        Nav::Back => StepAction::Back,
        Nav::Cancel => StepAction::Cancel,
    }
}

fn text(
    theme: &ColorfulTheme,
    prompt: &str,
    initial: &str,
    validator: Validator,
) -> Result<String, CliError> {
    let checker = validator.clone();
    let raw = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .validate_with(move |input: &String| checker.validate(input).map(|_| ()))
        .interact_text()?;
    validator.validate(&raw).map_err(CliError::Input)
}

fn optional_number<T: std::str::FromStr>(raw: &str) -> Option<T> {
    if raw.is_empty() {
        None
    } else {
        raw.parse().ok()
    }
}

fn display<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn url_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns `None` when the user cancels.
pub fn property_type(theme: &ColorfulTheme) -> Result<Option<PropertyKind>, CliError> {
    let mut labels: Vec<&str> = PropertyKind::ALL.iter().map(|kind| kind.label()).collect();
    labels.push("Cancel");
    let index = Select::with_theme(theme)
        .with_prompt("What kind of property are you listing?")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(PropertyKind::ALL.get(index).copied())
}

pub fn basic_info(
    theme: &ColorfulTheme,
    initial: BasicInfoInput,
    can_back: bool,
) -> Result<StepAction<BasicInfoInput>, CliError> {
    let title = text(theme, "Title", &initial.title, Validator::MaxLength(120))?;
    let description = text(
        theme,
        "Description",
        &initial.description,
        Validator::MaxLength(2000),
    )?;
    let modes = [RentalMode::ByUnit, RentalMode::Complete];
    let mode_labels: Vec<&str> = modes.iter().map(|mode| mode.label()).collect();
    let mode_index = Select::with_theme(theme)
        .with_prompt("Rental mode")
        .items(&mode_labels)
        .default(match initial.rental_mode {
            Some(RentalMode::Complete) => 1,
            _ => 0,
        })
        .interact()?;
    let requires_deposit = Confirm::with_theme(theme)
        .with_prompt("Requires a deposit?")
        .default(initial.requires_deposit)
        .interact()?;
    let requires_contract = Confirm::with_theme(theme)
        .with_prompt("Requires a contract?")
        .default(initial.requires_contract)
        .interact()?;
    let min_contract_months = if requires_contract {
        let raw = text(
            theme,
            "Minimum contract length (months)",
            &display(initial.min_contract_months),
            Validator::OptionalPositiveInteger,
        )?;
        optional_number(&raw)
    } else {
        None
    };

    let value = BasicInfoInput {
        title,
        description,
        rental_mode: Some(modes[mode_index]),
        requires_deposit,
        requires_contract,
        min_contract_months,
    };
    Ok(finish(nav_menu(theme, can_back, "Continue")?, value))
}

pub fn location(
    theme: &ColorfulTheme,
    initial: LocationInfo,
    can_back: bool,
) -> Result<StepAction<LocationInfo>, CliError> {
    let street = text(theme, "Street address", &initial.street, Validator::None)?;
    let neighborhood = text(
        theme,
        "Neighborhood (optional)",
        initial.neighborhood.as_deref().unwrap_or_default(),
        Validator::None,
    )?;
    let city = text(
        theme,
        "City id",
        &display(initial.city_id),
        Validator::OptionalPositiveInteger,
    )?;
    let department = text(
        theme,
        "Department id (optional)",
        &display(initial.department_id),
        Validator::OptionalPositiveInteger,
    )?;
    let (lat, lng) = initial
        .coordinates
        .map(|point| (point.lat.to_string(), point.lng.to_string()))
        .unwrap_or_default();
    let lat = text(theme, "Latitude", &lat, Validator::Latitude)?;
    let lng = text(theme, "Longitude", &lng, Validator::Longitude)?;

    let coordinates = match (lat.parse::<f64>(), lng.parse::<f64>()) {
        (Ok(lat), Ok(lng)) => Some(Coordinates::new(lat, lng)),
        _ => None,
    };
    let value = LocationInfo {
        street,
        neighborhood: Some(neighborhood),
        city_id: optional_number(&city),
        department_id: optional_number(&department),
        coordinates,
        nearby_institutions: initial.nearby_institutions,
    };
    Ok(finish(nav_menu(theme, can_back, "Continue")?, value))
}

pub fn services(
    theme: &ColorfulTheme,
    initial: Vec<ServiceOffering>,
    can_back: bool,
) -> Result<StepAction<Vec<ServiceOffering>>, CliError> {
    let labels: Vec<&str> = ServiceKind::ALL.iter().map(|kind| kind.label()).collect();
    let defaults: Vec<bool> = ServiceKind::ALL
        .iter()
        .map(|kind| initial.iter().any(|service| service.kind == *kind))
        .collect();
    let chosen = MultiSelect::with_theme(theme)
        .with_prompt("Services offered (space to toggle)")
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    let mut value = Vec::with_capacity(chosen.len());
    for index in chosen {
        let kind = ServiceKind::ALL[index];
        let previous = initial.iter().find(|service| service.kind == kind);
        let raw = text(
            theme,
            &format!("{} surcharge (blank if included)", kind.label()),
            &display(previous.and_then(|service| service.surcharge)),
            Validator::OptionalPositiveInteger,
        )?;
        let surcharge = optional_number(&raw);
        value.push(ServiceOffering {
            kind,
            included: surcharge.is_none(),
            surcharge,
            note: previous.and_then(|service| service.note.clone()),
        });
    }
    Ok(finish(nav_menu(theme, can_back, "Continue")?, value))
}

pub fn rules(
    theme: &ColorfulTheme,
    initial: Vec<HouseRule>,
    can_back: bool,
) -> Result<StepAction<Vec<HouseRule>>, CliError> {
    let mut value = Vec::new();
    for kind in RuleKind::ALL {
        let previous = initial.iter().find(|rule| rule.kind == kind);
        let rule_value = if kind.takes_flag() {
            let default = match previous.map(|rule| &rule.value) {
                Some(RuleValue::Allowed(true)) => 1,
                Some(RuleValue::Allowed(false)) => 2,
                _ => 0,
            };
            let index = Select::with_theme(theme)
                .with_prompt(kind.label())
                .items(&FLAG_CHOICES[..])
                .default(default)
                .interact()?;
            match index {
                1 => Some(RuleValue::Allowed(true)),
                2 => Some(RuleValue::Allowed(false)),
                _ => None,
            }
        } else {
            let current = match previous.map(|rule| &rule.value) {
                Some(RuleValue::Text(text)) => text.clone(),
                _ => String::new(),
            };
            let raw = text(
                theme,
                &format!("{} (blank for none)", kind.label()),
                &current,
                Validator::MaxLength(200),
            )?;
            (!raw.is_empty()).then_some(RuleValue::Text(raw))
        };
        if let Some(rule_value) = rule_value {
            value.push(HouseRule {
                kind,
                value: rule_value,
                note: previous.and_then(|rule| rule.note.clone()),
            });
        }
    }
    Ok(finish(nav_menu(theme, can_back, "Continue")?, value))
}

fn pick_amenities(
    theme: &ColorfulTheme,
    prompt: &str,
    options: &[Amenity],
    selected: &[Uuid],
) -> Result<Vec<Uuid>, CliError> {
    if options.is_empty() {
        return Ok(selected.to_vec());
    }
    let labels: Vec<&str> = options.iter().map(|amenity| amenity.name.as_str()).collect();
    let defaults: Vec<bool> = options
        .iter()
        .map(|amenity| selected.contains(&amenity.id))
        .collect();
    let chosen = MultiSelect::with_theme(theme)
        .with_prompt(prompt)
        .items(&labels)
        .defaults(&defaults)
        .interact()?;
    Ok(chosen.into_iter().map(|index| options[index].id).collect())
}

pub fn common_areas(
    theme: &ColorfulTheme,
    initial: Vec<Uuid>,
    options: &[Amenity],
    can_back: bool,
) -> Result<StepAction<Vec<Uuid>>, CliError> {
    let value = pick_amenities(theme, "Common areas (space to toggle)", options, &initial)?;
    Ok(finish(nav_menu(theme, can_back, "Continue")?, value))
}

pub fn unit_menu(
    theme: &ColorfulTheme,
    units: &[UnitDraft],
    can_add: bool,
    can_back: bool,
) -> Result<UnitMenu, CliError> {
    let mut items: Vec<(String, UnitMenu)> = Vec::new();
    if can_add {
        items.push(("Add unit".into(), UnitMenu::Add));
    }
    for (index, unit) in units.iter().enumerate() {
        items.push((format!("Edit \"{}\"", unit.title), UnitMenu::Edit(index)));
    }
    for (index, unit) in units.iter().enumerate() {
        items.push((format!("Remove \"{}\"", unit.title), UnitMenu::Remove(index)));
    }
    items.push(("Continue".into(), UnitMenu::Finish));
    if can_back {
        items.push(("Back".into(), UnitMenu::Back));
    }
    items.push(("Cancel".into(), UnitMenu::Cancel));

    let labels: Vec<&str> = items.iter().map(|(label, _)| label.as_str()).collect();
    let index = Select::with_theme(theme)
        .with_prompt(format!("Units ({})", units.len()))
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(items[index].1)
}

pub fn unit(
    theme: &ColorfulTheme,
    initial: UnitDraft,
    amenities: &[Amenity],
) -> Result<UnitDraft, CliError> {
    let title = text(theme, "Unit title", &initial.title, Validator::MaxLength(80))?;
    let rent = text(
        theme,
        "Monthly rent",
        &display(initial.rent),
        Validator::PositiveInteger,
    )?;
    let area = text(
        theme,
        "Area in m² (optional)",
        &display(initial.area),
        Validator::Custom(std::sync::Arc::new(|input: &str| {
            if input.is_empty() {
                Ok(String::new())
            } else {
                Validator::PositiveNumber.validate(input)
            }
        })),
    )?;
    let room_labels: Vec<&str> = RoomType::ALL.iter().map(|room| room.label()).collect();
    let room_default = initial
        .room_type
        .and_then(|current| RoomType::ALL.iter().position(|room| *room == current))
        .unwrap_or(0);
    let room_index = Select::with_theme(theme)
        .with_prompt("Room type")
        .items(&room_labels)
        .default(room_default)
        .interact()?;
    let selected = pick_amenities(
        theme,
        "Unit amenities (space to toggle)",
        amenities,
        &initial.amenities,
    )?;
    let current_urls: Vec<&str> = initial.media.iter().map(|item| item.url.as_str()).collect();
    let urls = text(
        theme,
        "Unit image URLs (comma separated)",
        &current_urls.join(", "),
        Validator::None,
    )?;

    Ok(UnitDraft {
        id: initial.id,
        title,
        rent: optional_number(&rent),
        area: optional_number(&area),
        room_type: Some(RoomType::ALL[room_index]),
        amenities: selected,
        media: gallery(url_list(&urls), &initial.media),
        coordinates: initial.coordinates,
    })
}

/// Rebuilds a gallery from URLs, keeping captions and the cover flag of
/// images that were already there. The first image becomes the cover when
/// none is marked.
fn gallery(urls: Vec<String>, previous: &[MediaRef]) -> Vec<MediaRef> {
    let mut media: Vec<MediaRef> = urls
        .into_iter()
        .map(|url| {
            previous
                .iter()
                .find(|item| item.url == url)
                .cloned()
                .unwrap_or_else(|| MediaRef::new(url))
        })
        .collect();
    if !media.iter().any(|item| item.is_cover) {
        if let Some(first) = media.first_mut() {
            first.is_cover = true;
        }
    }
    media
}

pub fn media(
    theme: &ColorfulTheme,
    initial: Vec<MediaRef>,
    can_back: bool,
) -> Result<StepAction<Vec<MediaRef>>, CliError> {
    let current: Vec<&str> = initial.iter().map(|item| item.url.as_str()).collect();
    let urls = text(
        theme,
        "Property image URLs (comma separated)",
        &current.join(", "),
        Validator::None,
    )?;
    let value = gallery(url_list(&urls), &initial);
    Ok(finish(nav_menu(theme, can_back, "Submit listing")?, value))
}
