use colored::Colorize;
use std::fmt;

use crate::domain::RentalMode;
use crate::steps::FieldErrors;
use crate::wizard::{WizardStep, TOTAL_STEPS};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

fn build_label(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Info => "[i]",
        MessageKind::Success => "[ok]",
        MessageKind::Warning => "[!]",
        MessageKind::Error => "[x]",
        MessageKind::Section => "",
    }
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    let formatted = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        _ => format!("{} {}", build_label(kind), text),
    };
    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
        MessageKind::Info => formatted,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Progress header shown above every step, counted along the path the
/// rental mode actually visits.
pub fn step_header(step: WizardStep, mode: RentalMode) {
    section(step_title(step, mode));
}

fn step_title(step: WizardStep, mode: RentalMode) -> String {
    let (position, total) = step
        .progress(mode)
        .unwrap_or((step.index() + 1, TOTAL_STEPS));
    format!("Step {position} of {total} · {}", step.label())
}

/// Lists field errors under the step that produced them.
pub fn field_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        println!("  {} {}", format!("{field}:").bright_red(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_wraps_title() {
        colored::control::set_override(false);
        assert_eq!(apply_style(MessageKind::Section, " Location "), "=== Location ===");
        assert_eq!(apply_style(MessageKind::Error, "boom"), "[x] boom");
    }

    #[test]
    fn step_title_counts_the_visited_path() {
        assert_eq!(
            step_title(WizardStep::Location, RentalMode::Complete),
            "Step 3 of 5 · Location"
        );
        assert_eq!(
            step_title(WizardStep::UnitBuilder, RentalMode::Complete),
            "Step 4 of 5 · Units"
        );
        assert_eq!(
            step_title(WizardStep::UnitBuilder, RentalMode::ByUnit),
            "Step 7 of 8 · Units"
        );
    }
}
