//! Multi-step listing submission flow.
//!
//! [`WizardController`] drives the steps; the transition table lives in
//! [`step`], the draft-to-payload transformation in [`assembler`], and the
//! session snapshot in [`persistence`].

pub mod amenities;
pub mod assembler;
pub mod controller;
pub mod effects;
pub mod persistence;
pub mod step;
pub mod submission;
pub mod unit_builder;

pub use amenities::{AmenityDirectory, AmenityState};
pub use assembler::{assemble, PropertyPayload, UnitPayload};
pub use controller::{Navigation, SubmitPhase, WizardController};
pub use effects::{Completion, DashboardRedirect, NoopViewport, Viewport, DASHBOARD_ROUTE};
pub use persistence::{
    DraftPersistence, DraftSnapshot, DraftStore, JsonFileDraftStore, MemoryDraftStore,
    CONTAINER_FLOW_DRAFT_KEY,
};
pub use step::{next_step, previous_step, WizardStep, TOTAL_STEPS};
pub use submission::{submit, FlowMode, FlowProps, SubmissionTarget};
pub use unit_builder::UnitBuilder;
