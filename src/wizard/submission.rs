//! Flow entry options and the single terminal write.

use tracing::{error, info};
use uuid::Uuid;

use crate::api::{ApiError, PropertyApi, PropertyRecord};
use crate::domain::PropertyKind;
use crate::errors::PreconditionError;

use super::PropertyPayload;

/// Options supplied by the embedding application when the flow mounts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowProps {
    /// Existing property; switches the flow to edit mode.
    pub existing_id: Option<Uuid>,
    /// Pre-selected classification; skips the type selection step.
    pub initial_property_type: Option<PropertyKind>,
    /// Create the property on behalf of `target_owner_id`.
    pub admin: bool,
    pub target_owner_id: Option<Uuid>,
}

impl FlowProps {
    pub fn create() -> Self {
        Self::default()
    }

    pub fn edit(id: Uuid) -> Self {
        Self {
            existing_id: Some(id),
            ..Self::default()
        }
    }

    pub fn admin(target_owner_id: Option<Uuid>) -> Self {
        Self {
            admin: true,
            target_owner_id,
            ..Self::default()
        }
    }

    pub fn with_property_type(mut self, kind: PropertyKind) -> Self {
        self.initial_property_type = Some(kind);
        self
    }

    pub fn mode(&self) -> FlowMode {
        if let Some(id) = self.existing_id {
            FlowMode::Edit { id }
        } else if self.admin {
            FlowMode::AdminCreate
        } else {
            FlowMode::Create
        }
    }

    pub fn is_edit(&self) -> bool {
        self.existing_id.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowMode {
    Create,
    Edit { id: Uuid },
    AdminCreate,
}

/// Which write the terminal step performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionTarget {
    Create,
    Update { id: Uuid },
    AdminCreate { target_owner_id: Uuid },
}

impl SubmissionTarget {
    /// Resolves the target, rejecting an admin flow without an owner before
    /// any request is made. Edit mode wins over the admin flag.
    pub fn resolve(props: &FlowProps) -> Result<Self, PreconditionError> {
        match props.mode() {
            FlowMode::Create => Ok(SubmissionTarget::Create),
            FlowMode::Edit { id } => Ok(SubmissionTarget::Update { id }),
            FlowMode::AdminCreate => props
                .target_owner_id
                .map(|target_owner_id| SubmissionTarget::AdminCreate { target_owner_id })
                .ok_or(PreconditionError::MissingTargetOwner),
        }
    }
}

/// Performs exactly one write against the property service.
pub async fn submit(
    api: &dyn PropertyApi,
    payload: &PropertyPayload,
    target: SubmissionTarget,
) -> Result<PropertyRecord, ApiError> {
    let result = match target {
        SubmissionTarget::Create => api.create_property(payload).await,
        SubmissionTarget::Update { id } => api.update_property(id, payload).await,
        SubmissionTarget::AdminCreate { target_owner_id } => {
            api.admin_create_property(payload, target_owner_id).await
        }
    };
    match &result {
        Ok(record) => info!(property_id = %record.id, ?target, "property submitted"),
        Err(err) => error!(error = %err, ?target, "property submission failed"),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_without_owner_is_a_precondition_error() {
        assert_eq!(
            SubmissionTarget::resolve(&FlowProps::admin(None)),
            Err(PreconditionError::MissingTargetOwner)
        );
    }

    #[test]
    fn admin_with_owner_targets_admin_create() {
        let owner = Uuid::new_v4();
        assert_eq!(
            SubmissionTarget::resolve(&FlowProps::admin(Some(owner))),
            Ok(SubmissionTarget::AdminCreate {
                target_owner_id: owner
            })
        );
    }

    #[test]
    fn edit_takes_precedence_over_admin() {
        let id = Uuid::new_v4();
        let props = FlowProps {
            existing_id: Some(id),
            admin: true,
            ..FlowProps::default()
        };
        assert_eq!(
            SubmissionTarget::resolve(&props),
            Ok(SubmissionTarget::Update { id })
        );
    }
}
