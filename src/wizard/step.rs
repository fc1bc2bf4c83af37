//! Wizard steps and the transition table.
//!
//! The table is a pair of pure functions from `(step, rental mode)` to the
//! neighbouring step. Backward transitions mirror the forward skip so the
//! flow never lands on a step that forward navigation bypassed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{RentalMode, StepFragment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    TypeSelection,
    BasicInfo,
    Location,
    Services,
    Rules,
    CommonAreas,
    UnitBuilder,
    MediaGallery,
}

/// Total number of steps in the wizard.
pub const TOTAL_STEPS: usize = 8;

impl WizardStep {
    pub const ALL: [WizardStep; TOTAL_STEPS] = [
        WizardStep::TypeSelection,
        WizardStep::BasicInfo,
        WizardStep::Location,
        WizardStep::Services,
        WizardStep::Rules,
        WizardStep::CommonAreas,
        WizardStep::UnitBuilder,
        WizardStep::MediaGallery,
    ];

    /// Zero-based position, as stored in the session snapshot.
    pub fn index(self) -> usize {
        match self {
            Self::TypeSelection => 0,
            Self::BasicInfo => 1,
            Self::Location => 2,
            Self::Services => 3,
            Self::Rules => 4,
            Self::CommonAreas => 5,
            Self::UnitBuilder => 6,
            Self::MediaGallery => 7,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::TypeSelection => "Property type",
            Self::BasicInfo => "Basic information",
            Self::Location => "Location",
            Self::Services => "Services",
            Self::Rules => "House rules",
            Self::CommonAreas => "Common areas",
            Self::UnitBuilder => "Units",
            Self::MediaGallery => "Photos",
        }
    }

    /// Steps that only exist for containers rented by unit.
    pub fn is_container_config(self) -> bool {
        matches!(self, Self::Services | Self::Rules | Self::CommonAreas)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::MediaGallery)
    }

    /// One-based position of this step and the length of the path it sits
    /// on. `None` for a step the mode skips.
    pub fn progress(self, mode: RentalMode) -> Option<(usize, usize)> {
        let path = Self::path(mode);
        path.iter()
            .position(|step| *step == self)
            .map(|index| (index + 1, path.len()))
    }

    /// Steps visited for the given rental mode, in order.
    pub fn path(mode: RentalMode) -> Vec<WizardStep> {
        Self::ALL
            .into_iter()
            .filter(|step| mode.is_by_unit() || !step.is_container_config())
            .collect()
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Forward transition. `None` on the terminal step.
pub fn next_step(current: WizardStep, mode: RentalMode) -> Option<WizardStep> {
    use WizardStep::*;
    match (current, mode) {
        (Location, RentalMode::ByUnit) => Some(Services),
        (Location, RentalMode::Complete) => Some(UnitBuilder),
        (CommonAreas, _) => Some(UnitBuilder),
        (UnitBuilder, _) => Some(MediaGallery),
        (MediaGallery, _) => None,
        (step, _) => WizardStep::from_index(step.index() + 1),
    }
}

/// Backward transition. `None` on the first step.
pub fn previous_step(current: WizardStep, mode: RentalMode) -> Option<WizardStep> {
    use WizardStep::*;
    match (current, mode) {
        (UnitBuilder, RentalMode::ByUnit) => Some(CommonAreas),
        (UnitBuilder, RentalMode::Complete) => Some(Location),
        (Services, _) => Some(Location),
        (MediaGallery, _) => Some(UnitBuilder),
        (TypeSelection, _) => None,
        (step, _) => WizardStep::from_index(step.index() - 1),
    }
}

impl StepFragment {
    /// Step whose form produces this fragment.
    pub fn step(&self) -> WizardStep {
        match self {
            StepFragment::BasicInfo(_) => WizardStep::BasicInfo,
            StepFragment::Location(_) => WizardStep::Location,
            StepFragment::Services(_) => WizardStep::Services,
            StepFragment::Rules(_) => WizardStep::Rules,
            StepFragment::CommonAreas(_) => WizardStep::CommonAreas,
            StepFragment::Units(_) => WizardStep::UnitBuilder,
            StepFragment::Media(_) => WizardStep::MediaGallery,
        }
    }
}
