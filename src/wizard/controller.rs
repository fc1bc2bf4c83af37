//! The flow controller.
//!
//! Owns the current step, the accumulated draft, and the selected property
//! type. Steps talk to it only through [`StepOutcome`]s; it merges their
//! fragments, picks the next step from the transition table, persists the
//! snapshot, and performs the final submission.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::api::{PropertyApi, PropertyRecord};
use crate::domain::{apply_classification, merge_fragment, Draft, PropertyKind, StepFragment};
use crate::errors::{PreconditionError, WizardError};
use crate::steps::StepOutcome;

use super::amenities::AmenityDirectory;
use super::effects::{Completion, NoopViewport, Viewport};
use super::persistence::{DraftPersistence, DraftStore};
use super::submission::{self, FlowProps, SubmissionTarget};
use super::unit_builder::UnitBuilder;
use super::{assemble, next_step, previous_step, PropertyPayload, WizardStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Editing,
    Submitting,
    Submitted,
}

/// Where navigation landed after an outcome was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved(WizardStep),
    /// Data recorded on the terminal step; submit to finish.
    Stayed(WizardStep),
}

pub struct WizardController {
    step: WizardStep,
    draft: Draft,
    selected_type: Option<PropertyKind>,
    type_step_skipped: bool,
    props: FlowProps,
    persistence: DraftPersistence,
    viewport: Box<dyn Viewport>,
    completion: Option<Box<dyn Completion>>,
    amenities: AmenityDirectory,
    phase: SubmitPhase,
    last_error: Option<String>,
}

impl WizardController {
    /// Mounts the flow.
    ///
    /// `seed` is the stored property for edit flows. Outside edit mode a
    /// saved snapshot wins over `props.initial_property_type`; without a
    /// snapshot, a pre-selected type skips the type selection step. Edit
    /// flows skip it too and keep the stored classification.
    pub fn mount(props: FlowProps, seed: Option<Draft>, store: Box<dyn DraftStore>) -> Self {
        let persistence = DraftPersistence::new(store, props.is_edit());
        let mut draft = seed.unwrap_or_default();
        if let Some(id) = props.existing_id {
            draft.id = Some(id);
        }

        let mut step = WizardStep::TypeSelection;
        let mut selected_type = None;
        let mut type_step_skipped = false;

        if let Some(snapshot) = persistence.load() {
            let age_secs = snapshot
                .saved_at
                .map(|saved_at| (Utc::now() - saved_at).num_seconds());
            info!(step = snapshot.step, ?age_secs, "resuming draft from snapshot");
            step = snapshot.wizard_step().unwrap_or(WizardStep::TypeSelection);
            draft = snapshot.data;
            selected_type = snapshot.selected_property_type;
        } else if let Some(kind) = props.initial_property_type {
            selected_type = Some(kind);
            type_step_skipped = true;
            step = WizardStep::BasicInfo;
        } else if props.is_edit() {
            selected_type = draft
                .property_type_id
                .and_then(PropertyKind::from_classification_id);
            type_step_skipped = true;
            step = WizardStep::BasicInfo;
        }

        if draft.rental_mode.is_none() {
            if let Some(kind) = selected_type {
                draft.rental_mode = Some(kind.default_rental_mode());
            }
        }
        apply_classification(&mut draft, selected_type);

        info!(step = %step, mode = ?props.mode(), "listing wizard mounted");
        Self {
            step,
            draft,
            selected_type,
            type_step_skipped,
            props,
            persistence,
            viewport: Box::new(NoopViewport),
            completion: None,
            amenities: AmenityDirectory::empty(),
            phase: SubmitPhase::Editing,
            last_error: None,
        }
    }

    pub fn with_viewport(mut self, viewport: Box<dyn Viewport>) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_completion(mut self, completion: Box<dyn Completion>) -> Self {
        self.completion = Some(completion);
        self
    }

    pub fn with_amenities(mut self, amenities: AmenityDirectory) -> Self {
        self.amenities = amenities;
        self
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn selected_type(&self) -> Option<PropertyKind> {
        self.selected_type
    }

    pub fn props(&self) -> &FlowProps {
        &self.props
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn amenities(&self) -> &AmenityDirectory {
        &self.amenities
    }

    /// Unit builder seeded from the draft.
    pub fn unit_builder(&self) -> UnitBuilder {
        UnitBuilder::from_draft(&self.draft)
    }

    /// Whether the back control should be offered on the current step.
    pub fn can_retreat(&self) -> bool {
        if self.phase != SubmitPhase::Editing {
            return false;
        }
        match previous_step(self.step, self.draft.effective_rental_mode()) {
            Some(WizardStep::TypeSelection) => !self.type_step_skipped,
            Some(_) => true,
            None => false,
        }
    }

    /// Payload the terminal step would send right now.
    pub fn payload_preview(&self) -> PropertyPayload {
        assemble(&self.draft)
    }

    /// Picks the property type on the selection step and moves on.
    pub fn select_type(&mut self, kind: PropertyKind) -> Result<Navigation, WizardError> {
        self.ensure_editing()?;
        self.ensure_step(WizardStep::TypeSelection)?;
        self.selected_type = Some(kind);
        if self.draft.rental_mode.is_none() {
            self.draft.rental_mode = Some(kind.default_rental_mode());
        }
        apply_classification(&mut self.draft, self.selected_type);
        debug!(property_type = kind.code(), "property type selected");
        self.transition(WizardStep::BasicInfo);
        self.persist();
        Ok(Navigation::Moved(self.step))
    }

    pub fn apply(&mut self, outcome: StepOutcome) -> Result<Navigation, WizardError> {
        match outcome {
            StepOutcome::Advance(fragment) => self.advance(fragment),
            StepOutcome::Retreat => self.retreat(),
        }
    }

    /// Merges a confirmed fragment and moves forward.
    pub fn advance(&mut self, fragment: StepFragment) -> Result<Navigation, WizardError> {
        self.ensure_editing()?;
        if self.step == WizardStep::TypeSelection {
            return Err(PreconditionError::PropertyTypeRequired.into());
        }
        self.ensure_step(fragment.step())?;
        if let StepFragment::Units(units) = &fragment {
            UnitBuilder::check_unit_count(self.draft.effective_rental_mode(), units.len())?;
        }

        self.merge(fragment);
        match next_step(self.step, self.draft.effective_rental_mode()) {
            Some(next) => {
                self.transition(next);
                self.persist();
                Ok(Navigation::Moved(next))
            }
            None => {
                self.persist();
                Ok(Navigation::Stayed(self.step))
            }
        }
    }

    /// Merges a fragment without navigating, e.g. to keep unit builder
    /// progress while the step is still open.
    pub fn record(&mut self, fragment: StepFragment) -> Result<(), WizardError> {
        self.ensure_editing()?;
        self.ensure_step(fragment.step())?;
        self.merge(fragment);
        self.persist();
        Ok(())
    }

    /// Moves to the previous step. The draft is left untouched.
    pub fn retreat(&mut self) -> Result<Navigation, WizardError> {
        self.ensure_editing()?;
        if !self.can_retreat() {
            return Err(PreconditionError::NoPreviousStep(self.step).into());
        }
        let previous = previous_step(self.step, self.draft.effective_rental_mode())
            .ok_or(PreconditionError::NoPreviousStep(self.step))?;
        self.transition(previous);
        self.persist();
        Ok(Navigation::Moved(previous))
    }

    /// Sends the assembled draft with exactly one write.
    ///
    /// All precondition checks run before the request. On success the
    /// snapshot is cleared before the completion callback runs; on failure
    /// the flow stays on the terminal step with the draft and snapshot
    /// intact so the user can retry.
    pub async fn submit(&mut self, api: &dyn PropertyApi) -> Result<PropertyRecord, WizardError> {
        match self.phase {
            SubmitPhase::Submitting => return Err(PreconditionError::SubmissionInFlight.into()),
            SubmitPhase::Submitted => return Err(PreconditionError::AlreadySubmitted.into()),
            SubmitPhase::Editing => {}
        }
        if !self.step.is_terminal() {
            return Err(PreconditionError::NotOnTerminalStep(self.step).into());
        }
        let target = match SubmissionTarget::resolve(&self.props) {
            Ok(target) => target,
            Err(err) => return Err(self.fail(err.into())),
        };
        if let Err(err) =
            UnitBuilder::check_unit_count(self.draft.effective_rental_mode(), self.draft.units.len())
        {
            return Err(self.fail(err.into()));
        }

        let payload = assemble(&self.draft);
        self.phase = SubmitPhase::Submitting;
        self.last_error = None;

        match submission::submit(api, &payload, target).await {
            Ok(record) => {
                self.phase = SubmitPhase::Submitted;
                if self.persistence.is_enabled() {
                    self.persistence.clear();
                }
                if let Some(completion) = self.completion.as_mut() {
                    completion.complete(&record);
                }
                Ok(record)
            }
            Err(err) => {
                self.phase = SubmitPhase::Editing;
                Err(self.fail(err.into()))
            }
        }
    }

    fn fail(&mut self, err: WizardError) -> WizardError {
        warn!(error = %err, "submission blocked");
        self.last_error = Some(err.to_string());
        err
    }

    fn merge(&mut self, fragment: StepFragment) {
        let draft = std::mem::take(&mut self.draft);
        self.draft = merge_fragment(draft, fragment);
        apply_classification(&mut self.draft, self.selected_type);
    }

    fn transition(&mut self, to: WizardStep) {
        info!(from = %self.step, to = %to, "wizard step changed");
        self.step = to;
        self.viewport.scroll_to_top();
    }

    fn persist(&self) {
        self.persistence
            .save(self.step, &self.draft, self.selected_type, self.is_submitting());
    }

    fn ensure_editing(&self) -> Result<(), PreconditionError> {
        match self.phase {
            SubmitPhase::Editing => Ok(()),
            SubmitPhase::Submitting => Err(PreconditionError::SubmissionInFlight),
            SubmitPhase::Submitted => Err(PreconditionError::AlreadySubmitted),
        }
    }

    fn ensure_step(&self, actual: WizardStep) -> Result<(), PreconditionError> {
        if actual == self.step {
            Ok(())
        } else {
            Err(PreconditionError::StepMismatch {
                expected: self.step,
                actual,
            })
        }
    }
}
