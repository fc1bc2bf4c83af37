//! Interactive terminal front end for the listing wizard.

pub mod output;
pub mod prompts;
pub mod runner;

use std::sync::Arc;

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::api::{ApiError, HttpPropertyApi, PropertyApi};
use crate::config::ConfigManager;
use crate::domain::{Draft, PropertyKind};
use crate::errors::{ConfigError, StorageError, WizardError};
use crate::wizard::{
    AmenityDirectory, DashboardRedirect, FlowProps, JsonFileDraftStore, WizardController,
};

pub use runner::{run_wizard, TerminalViewport};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("{0}")]
    Usage(String),
}

/// Command line options of `listing_wizard_cli`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    pub property_type: Option<PropertyKind>,
    pub edit: Option<Uuid>,
    pub admin_owner: Option<Uuid>,
    pub help: bool,
}

impl LaunchOptions {
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = LaunchOptions::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--type" => {
                    let code = value_for(&mut args, "--type")?;
                    let kind = PropertyKind::from_code(&code).ok_or_else(|| {
                        CliError::Usage(format!("unknown property type `{code}`"))
                    })?;
                    options.property_type = Some(kind);
                }
                "--edit" => options.edit = Some(uuid_for(&mut args, "--edit")?),
                "--admin-owner" => options.admin_owner = Some(uuid_for(&mut args, "--admin-owner")?),
                "-h" | "--help" => options.help = true,
                other => return Err(CliError::Usage(format!("unexpected argument `{other}`"))),
            }
        }
        Ok(options)
    }

    pub fn props(&self) -> FlowProps {
        FlowProps {
            existing_id: self.edit,
            initial_property_type: self.property_type,
            admin: self.admin_owner.is_some(),
            target_owner_id: self.admin_owner,
        }
    }
}

fn value_for(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, CliError> {
    args.next()
        .ok_or_else(|| CliError::Usage(format!("{flag} expects a value")))
}

fn uuid_for(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<Uuid, CliError> {
    let raw = value_for(args, flag)?;
    Uuid::parse_str(raw.trim())
        .map_err(|_| CliError::Usage(format!("{flag} expects a UUID, got `{raw}`")))
}

pub fn usage() -> &'static str {
    "Usage: listing_wizard_cli [--type <pension|apartamento|casa|apartaestudio|habitacion>] \
     [--edit <property-id>] [--admin-owner <owner-id>]"
}

/// Resolves configuration, mounts the wizard, and runs it to completion.
pub async fn run(options: LaunchOptions) -> Result<(), CliError> {
    let manager = ConfigManager::new()?;
    let config = manager.resolve()?;
    let api = Arc::new(
        HttpPropertyApi::new(config.api_base_url.clone(), config.request_timeout())?
            .with_token(config.api_token.clone()),
    );

    let props = options.props();
    let seed = match props.existing_id {
        Some(id) => {
            info!(property_id = %id, "loading property for edit");
            Some(Draft::from(api.get_property(id).await?))
        }
        None => None,
    };
    let store = JsonFileDraftStore::new(manager.session_dir(&config))?;
    let amenities = AmenityDirectory::prefetch(api.clone());
    let redirect = DashboardRedirect::new();

    let mut controller = WizardController::mount(props, seed, Box::new(store))
        .with_viewport(Box::new(TerminalViewport))
        .with_completion(Box::new(redirect.clone()))
        .with_amenities(amenities);

    if let Some(record) = run_wizard(&mut controller, api.as_ref()).await? {
        output::success(format!("Listing saved with id {}", record.id));
        if let Some(route) = redirect.requested_route() {
            output::info(format!("Continue at {route}"));
        }
    }
    Ok(())
}
