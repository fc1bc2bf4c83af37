//! Drives a [`WizardController`] from the terminal.

use std::io;

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use dialoguer::theme::ColorfulTheme;

use crate::api::{PropertyApi, PropertyRecord};
use crate::errors::WizardError;
use crate::steps::{
    BasicInfoForm, CommonAreasForm, LocationForm, MediaForm, RulesForm, ServicesForm, StepForm,
};
use crate::wizard::{Navigation, UnitBuilder, Viewport, WizardController, WizardStep};

use super::output;
use super::prompts::{self, StepAction, UnitMenu};
use super::CliError;

/// Clears the terminal whenever the wizard changes step.
#[derive(Debug, Default)]
pub struct TerminalViewport;

impl Viewport for TerminalViewport {
    fn scroll_to_top(&mut self) {
        let _ = execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0));
    }
}

enum Flow {
    Accepted,
    Rejected,
    Cancelled,
}

/// Runs the wizard until the listing is submitted or the user cancels.
pub async fn run_wizard(
    controller: &mut WizardController,
    api: &dyn PropertyApi,
) -> Result<Option<PropertyRecord>, CliError> {
    let theme = ColorfulTheme::default();
    loop {
        let step = controller.step();
        output::step_header(step, controller.draft().effective_rental_mode());
        if let Some(message) = controller.last_error() {
            output::error(message);
        }
        let can_back = controller.can_retreat();
        let draft = controller.draft().clone();

        let flow = match step {
            WizardStep::TypeSelection => match prompts::property_type(&theme)? {
                Some(kind) => report(controller.select_type(kind))?,
                None => Flow::Cancelled,
            },
            WizardStep::BasicInfo => {
                let action = prompts::basic_info(&theme, BasicInfoForm::initial(&draft), can_back)?;
                dispatch::<BasicInfoForm>(controller, action)?
            }
            WizardStep::Location => {
                let action = prompts::location(&theme, LocationForm::initial(&draft), can_back)?;
                dispatch::<LocationForm>(controller, action)?
            }
            WizardStep::Services => {
                let action = prompts::services(&theme, ServicesForm::initial(&draft), can_back)?;
                dispatch::<ServicesForm>(controller, action)?
            }
            WizardStep::Rules => {
                let action = prompts::rules(&theme, RulesForm::initial(&draft), can_back)?;
                dispatch::<RulesForm>(controller, action)?
            }
            WizardStep::CommonAreas => {
                let options = controller.amenities().options();
                let action = prompts::common_areas(
                    &theme,
                    CommonAreasForm::initial(&draft),
                    &options,
                    can_back,
                )?;
                dispatch::<CommonAreasForm>(controller, action)?
            }
            WizardStep::UnitBuilder => build_units(controller, &theme)?,
            WizardStep::MediaGallery => {
                let action = prompts::media(&theme, MediaForm::initial(&draft), can_back)?;
                match dispatch::<MediaForm>(controller, action)? {
                    Flow::Accepted if controller.step() == WizardStep::MediaGallery => {
                        match controller.submit(api).await {
                            Ok(record) => return Ok(Some(record)),
                            Err(err) if err.is_recoverable() => Flow::Rejected,
                            Err(err) => return Err(err.into()),
                        }
                    }
                    flow => flow,
                }
            }
        };

        if let Flow::Cancelled = flow {
            output::warning("Listing wizard cancelled; your progress is kept for this session.");
            return Ok(None);
        }
    }
}

/// Validates a step's value and hands the outcome to the controller.
fn dispatch<F: StepForm>(
    controller: &mut WizardController,
    action: StepAction<F::Value>,
) -> Result<Flow, CliError> {
    match action {
        StepAction::Submit(value) => match F::confirm(value) {
            Ok(fragment) => report(controller.advance(fragment)),
            Err(errors) => {
                output::error("Please fix the highlighted fields:");
                output::field_errors(&errors);
                Ok(Flow::Rejected)
            }
        },
        StepAction::Back => report(controller.retreat()),
        StepAction::Cancel => Ok(Flow::Cancelled),
    }
}

/// Prints recoverable errors inline; anything else ends the session.
fn report(result: Result<Navigation, WizardError>) -> Result<Flow, CliError> {
    match result {
        Ok(_) => Ok(Flow::Accepted),
        Err(WizardError::Validation(errors)) => {
            output::error("Please fix the highlighted fields:");
            output::field_errors(&errors);
            Ok(Flow::Rejected)
        }
        Err(err) if err.is_recoverable() => {
            output::error(&err);
            Ok(Flow::Rejected)
        }
        Err(err) => Err(err.into()),
    }
}

fn build_units(controller: &mut WizardController, theme: &ColorfulTheme) -> Result<Flow, CliError> {
    let mut builder = controller.unit_builder();

    loop {
        // The catalogue may still be loading; take whatever is there now.
        let options = controller.amenities().options();
        for (index, unit) in builder.units().iter().enumerate() {
            output::info(format!(
                "{}. {} · {}",
                index + 1,
                unit.title,
                unit.rent.map(|rent| rent.to_string()).unwrap_or_default()
            ));
        }
        let choice = prompts::unit_menu(
            theme,
            builder.units(),
            builder.can_add(),
            controller.can_retreat(),
        )?;
        let changed = match choice {
            UnitMenu::Add => {
                let template = if builder.rental_mode().is_by_unit() {
                    Default::default()
                } else {
                    UnitBuilder::whole_property_template(controller.draft())
                };
                let unit = prompts::unit(theme, template, &options)?;
                show_unit_result(builder.add(unit).map(|_| ()))
            }
            UnitMenu::Edit(index) => {
                let current = builder.units()[index].clone();
                let unit = prompts::unit(theme, current, &options)?;
                show_unit_result(builder.edit(index, unit))
            }
            UnitMenu::Remove(index) => show_unit_result(
                builder
                    .remove(index)
                    .map(|_| ())
                    .map_err(WizardError::from),
            ),
            UnitMenu::Finish => match builder.clone().finish() {
                Ok(fragment) => return report(controller.advance(fragment)),
                Err(err) => {
                    output::error(&err);
                    false
                }
            },
            UnitMenu::Back => return report(controller.retreat()),
            UnitMenu::Cancel => return Ok(Flow::Cancelled),
        };
        if changed {
            controller.record(builder.clone().into_fragment())?;
        }
    }
}

fn show_unit_result(result: Result<(), WizardError>) -> bool {
    match result {
        Ok(()) => true,
        Err(WizardError::Validation(errors)) => {
            output::error("The unit was not saved:");
            output::field_errors(&errors);
            false
        }
        Err(err) => {
            output::error(&err);
            false
        }
    }
}
