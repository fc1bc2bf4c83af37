//! Rentable unit editing for the unit builder step.
//!
//! Unit media attach here rather than on the gallery step. In complete
//! rental mode the builder must end up with exactly one unit standing for
//! the whole property.

use uuid::Uuid;

use crate::domain::{Draft, MediaRef, RentalMode, RoomType, StepFragment, UnitDraft};
use crate::errors::{PreconditionError, WizardError};
use crate::steps::form::{is_blank, too_long};
use crate::steps::media::{normalize_gallery, validate_gallery};
use crate::steps::FieldErrors;

const MAX_UNIT_TITLE: usize = 80;

#[derive(Debug, Clone, PartialEq)]
pub struct UnitBuilder {
    units: Vec<UnitDraft>,
    rental_mode: RentalMode,
}

impl UnitBuilder {
    pub fn new(rental_mode: RentalMode) -> Self {
        Self {
            units: Vec::new(),
            rental_mode,
        }
    }

    /// Starts from the units already present on the draft.
    pub fn from_draft(draft: &Draft) -> Self {
        Self {
            units: draft.units.clone(),
            rental_mode: draft.effective_rental_mode(),
        }
    }

    pub fn rental_mode(&self) -> RentalMode {
        self.rental_mode
    }

    pub fn units(&self) -> &[UnitDraft] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Whether another unit may be added under the current rental mode.
    pub fn can_add(&self) -> bool {
        self.rental_mode.is_by_unit() || self.units.is_empty()
    }

    pub fn validate_unit(unit: &UnitDraft) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if is_blank(&unit.title) {
            errors.add("title", "Unit title is required");
        } else if too_long(&unit.title, MAX_UNIT_TITLE) {
            errors.add(
                "title",
                format!("Unit title must be at most {MAX_UNIT_TITLE} characters"),
            );
        }
        match unit.rent {
            None => errors.add("rent", "Rent is required"),
            Some(0) => errors.add("rent", "Rent must be greater than zero"),
            Some(_) => {}
        }
        if unit.room_type.is_none() {
            errors.add("roomType", "Select a room type");
        }
        if let Some(area) = unit.area {
            if !area.is_finite() || area <= 0.0 {
                errors.add("area", "Area must be a positive number");
            }
        }
        let gallery = validate_gallery("media", &unit.media);
        for (field, message) in gallery.iter() {
            errors.add(field, message);
        }
        errors
    }

    /// Appends a unit, returning its position.
    pub fn add(&mut self, unit: UnitDraft) -> Result<usize, WizardError> {
        if !self.can_add() {
            return Err(PreconditionError::WholePropertyUnitCount(self.units.len() + 1).into());
        }
        let unit = Self::normalize(unit)?;
        self.units.push(unit);
        Ok(self.units.len() - 1)
    }

    /// Replaces the unit at `index`, keeping its service id.
    pub fn edit(&mut self, index: usize, unit: UnitDraft) -> Result<(), WizardError> {
        let existing_id = self.get(index)?.id;
        let mut unit = Self::normalize(unit)?;
        if unit.id.is_none() {
            unit.id = existing_id;
        }
        self.units[index] = unit;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<UnitDraft, PreconditionError> {
        self.get(index)?;
        Ok(self.units.remove(index))
    }

    pub fn attach_media(&mut self, index: usize, media: MediaRef) -> Result<(), WizardError> {
        let unit = self.get_mut(index)?;
        let mut gallery = unit.media.clone();
        gallery.push(media);
        let errors = validate_gallery("media", &gallery);
        if !errors.is_empty() {
            return Err(errors.into());
        }
        unit.media = normalize_gallery(gallery);
        Ok(())
    }

    pub fn detach_media(&mut self, index: usize, url: &str) -> Result<bool, PreconditionError> {
        let unit = self.get_mut(index)?;
        let before = unit.media.len();
        unit.media.retain(|item| item.url != url);
        Ok(unit.media.len() != before)
    }

    /// Replaces the unit's amenity selection; duplicates are dropped.
    pub fn set_amenities(&mut self, index: usize, ids: Vec<Uuid>) -> Result<(), PreconditionError> {
        let unit = self.get_mut(index)?;
        let mut selected: Vec<Uuid> = Vec::with_capacity(ids.len());
        for id in ids {
            if !selected.contains(&id) {
                selected.push(id);
            }
        }
        unit.amenities = selected;
        Ok(())
    }

    /// Prefill for the single unit of a complete rental.
    pub fn whole_property_template(draft: &Draft) -> UnitDraft {
        UnitDraft {
            title: draft.title.clone().unwrap_or_default(),
            room_type: Some(RoomType::Whole),
            ..UnitDraft::default()
        }
    }

    /// Unit count rule applied before leaving the step and before submit.
    pub fn check_unit_count(mode: RentalMode, count: usize) -> Result<(), PreconditionError> {
        match (mode, count) {
            (_, 0) => Err(PreconditionError::NoUnits),
            (RentalMode::Complete, 1) | (RentalMode::ByUnit, _) => Ok(()),
            (RentalMode::Complete, n) => Err(PreconditionError::WholePropertyUnitCount(n)),
        }
    }

    pub fn check_leave(&self) -> Result<(), PreconditionError> {
        Self::check_unit_count(self.rental_mode, self.units.len())
    }

    /// Confirms the step, emitting the units fragment.
    pub fn finish(self) -> Result<StepFragment, PreconditionError> {
        self.check_leave()?;
        Ok(self.into_fragment())
    }

    /// Emits the current units without checking the count, for saving
    /// progress while the step is still open.
    pub fn into_fragment(self) -> StepFragment {
        StepFragment::Units(self.units)
    }

    fn normalize(mut unit: UnitDraft) -> Result<UnitDraft, FieldErrors> {
        Self::validate_unit(&unit).into_result(())?;
        unit.title = unit.title.trim().to_string();
        unit.media = normalize_gallery(unit.media);
        let amenities = std::mem::take(&mut unit.amenities);
        for id in amenities {
            if !unit.amenities.contains(&id) {
                unit.amenities.push(id);
            }
        }
        Ok(unit)
    }

    fn get(&self, index: usize) -> Result<&UnitDraft, PreconditionError> {
        self.units
            .get(index)
            .ok_or(PreconditionError::InvalidUnitIndex(index))
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut UnitDraft, PreconditionError> {
        self.units
            .get_mut(index)
            .ok_or(PreconditionError::InvalidUnitIndex(index))
    }
}
