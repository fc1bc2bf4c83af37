use std::result::Result as StdResult;

use thiserror::Error;

use crate::api::ApiError;
use crate::steps::FieldErrors;
use crate::wizard::WizardStep;

/// Unified error type for the submission wizard.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
    #[error("Submission failed: {0}")]
    Submission(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl WizardError {
    /// Validation and precondition failures are shown next to the control
    /// that triggered them; everything else is reported by the caller.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, WizardError::Storage(_))
    }
}

impl From<FieldErrors> for WizardError {
    fn from(errors: FieldErrors) -> Self {
        WizardError::Validation(errors)
    }
}

/// Actions blocked because the flow is not in a state that allows them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("Admin submissions require a target owner")]
    MissingTargetOwner,
    #[error("Add at least one unit before continuing")]
    NoUnits,
    #[error("A complete rental needs exactly one unit representing the whole property (found {0})")]
    WholePropertyUnitCount(usize),
    #[error("Submission is only available on the media step (current step: {0})")]
    NotOnTerminalStep(WizardStep),
    #[error("A submission is already in progress")]
    SubmissionInFlight,
    #[error("This listing has already been submitted")]
    AlreadySubmitted,
    #[error("There is no step before {0}")]
    NoPreviousStep(WizardStep),
    #[error("Select a property type first")]
    PropertyTypeRequired,
    #[error("Expected data for {expected} but received data for {actual}")]
    StepMismatch {
        expected: WizardStep,
        actual: WizardStep,
    },
    #[error("No unit at position {0}")]
    InvalidUnitIndex(usize),
}

/// Failures of the snapshot store and configuration files.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Invalid configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Storage(StorageError::Io(err))
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Storage(StorageError::Serde(err))
    }
}

pub type Result<T> = StdResult<T, WizardError>;
