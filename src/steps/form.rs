//! Field-level validation shared by the step forms and the interactive
//! prompts.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Validation failures keyed by the field that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure. The first message reported for a field is kept.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_insert_with(|| message.into());
    }

    /// Adds every error of `other`, prefixing field names with `prefix.`.
    pub fn absorb(&mut self, prefix: &str, other: FieldErrors) {
        for (field, message) in other.errors {
            self.add(format!("{prefix}.{field}"), message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    /// `Ok(value)` when no errors were recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();
        write!(f, "{}", rendered.join("; "))
    }
}

type ValidatorCallback = dyn Fn(&str) -> Result<String, String> + Send + Sync;

/// Built-in validation helpers for raw text input.
#[derive(Clone)]
pub enum Validator {
    None,
    NonEmpty,
    MaxLength(usize),
    PositiveInteger,
    OptionalPositiveInteger,
    PositiveNumber,
    Latitude,
    Longitude,
    Custom(Arc<ValidatorCallback>),
}

impl Validator {
    /// Returns the normalized value or a message suitable for display.
    pub fn validate(&self, input: &str) -> Result<String, String> {
        let trimmed = input.trim();
        match self {
            Validator::None => Ok(trimmed.to_string()),
            Validator::NonEmpty => {
                if trimmed.is_empty() {
                    Err("Value cannot be empty".into())
                } else {
                    Ok(trimmed.to_string())
                }
            }
            Validator::MaxLength(max) => {
                if trimmed.chars().count() > *max {
                    Err(format!("Use at most {max} characters"))
                } else {
                    Ok(trimmed.to_string())
                }
            }
            Validator::PositiveInteger => match trimmed.parse::<u64>() {
                Ok(value) if value > 0 => Ok(value.to_string()),
                Ok(_) => Err("Value must be greater than zero".into()),
                Err(_) => Err("Enter a whole number (e.g., 400000)".into()),
            },
            Validator::OptionalPositiveInteger => {
                if trimmed.is_empty() {
                    Ok(String::new())
                } else {
                    Validator::PositiveInteger.validate(trimmed)
                }
            }
            Validator::PositiveNumber => trimmed
                .parse::<f64>()
                .map_err(|_| "Enter a numeric value".to_string())
                .and_then(|value| {
                    if value > 0.0 {
                        Ok(value.to_string())
                    } else {
                        Err("Value must be greater than zero".into())
                    }
                }),
            Validator::Latitude => parse_in_range(trimmed, -90.0, 90.0),
            Validator::Longitude => parse_in_range(trimmed, -180.0, 180.0),
            Validator::Custom(func) => func(trimmed),
        }
    }
}

fn parse_in_range(input: &str, min: f64, max: f64) -> Result<String, String> {
    let value = input
        .parse::<f64>()
        .map_err(|_| "Enter a numeric value".to_string())?;
    if (min..=max).contains(&value) {
        Ok(value.to_string())
    } else {
        Err(format!("Value must be between {min} and {max}"))
    }
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub(crate) fn too_long(value: &str, max: usize) -> bool {
    value.chars().count() > max
}

/// Trims optional notes, turning blank values into `None`.
pub fn sanitize_note(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_error_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.add("title", "Title is required");
        errors.add("title", "Title is too long");
        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn absorb_prefixes_nested_fields() {
        let mut inner = FieldErrors::new();
        inner.add("rent", "Rent is required");
        let mut outer = FieldErrors::new();
        outer.absorb("units[0]", inner);
        assert!(outer.contains("units[0].rent"));
    }

    #[test]
    fn positive_integer_rejects_zero_and_text() {
        assert_eq!(Validator::PositiveInteger.validate(" 400000 "), Ok("400000".into()));
        assert!(Validator::PositiveInteger.validate("0").is_err());
        assert!(Validator::PositiveInteger.validate("abc").is_err());
        assert_eq!(Validator::OptionalPositiveInteger.validate(""), Ok(String::new()));
    }

    #[test]
    fn coordinate_validators_enforce_ranges() {
        assert!(Validator::Latitude.validate("4.6097").is_ok());
        assert!(Validator::Latitude.validate("95").is_err());
        assert!(Validator::Longitude.validate("-181").is_err());
    }

    #[test]
    fn blank_notes_are_dropped() {
        assert_eq!(sanitize_note(Some("   ")), None);
        assert_eq!(sanitize_note(Some(" quiet ")), Some("quiet".into()));
        assert_eq!(sanitize_note(None), None);
    }
}
