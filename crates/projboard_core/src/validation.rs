//! Project form input validation.
//!
//! # Responsibility
//! - Turn raw form text into a `ProjectDraft` the store can accept.
//! - Apply required/length/range rules from `InputRules`.
//!
//! # Invariants
//! - Text is trimmed and inner whitespace collapsed before length checks.
//! - The store never validates; producers call this first.

use crate::config::InputRules;
use crate::model::project::ProjectDraft;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Constraints for one text field. Lengths count characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRule {
    pub required: bool,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
}

/// Constraints for one numeric field. Bounds are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRule {
    pub required: bool,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

/// First rule violation found in the submitted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Missing {
        field: &'static str,
    },
    TooShort {
        field: &'static str,
        min: usize,
        actual: usize,
    },
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    NotANumber {
        field: &'static str,
        value: String,
    },
    OutOfRange {
        field: &'static str,
        value: i64,
        min: Option<i64>,
        max: Option<i64>,
    },
}

impl InputError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. }
            | Self::NotANumber { field, .. }
            | Self::OutOfRange { field, .. } => *field,
        }
    }
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{field} is required"),
            Self::TooShort { field, min, actual } => {
                write!(f, "{field} must be at least {min} characters, got {actual}")
            }
            Self::TooLong { field, max, actual } => {
                write!(f, "{field} must be at most {max} characters, got {actual}")
            }
            Self::NotANumber { field, value } => {
                write!(f, "{field} must be a whole number, got `{value}`")
            }
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => {
                write!(f, "{field} is out of range: {value}")?;
                match (min, max) {
                    (Some(min), Some(max)) => write!(f, " (expected {min}..={max})"),
                    (Some(min), None) => write!(f, " (expected >= {min})"),
                    (None, Some(max)) => write!(f, " (expected <= {max})"),
                    (None, None) => Ok(()),
                }
            }
        }
    }
}

impl Error for InputError {}

/// Validates raw form values and builds a draft.
///
/// `people` is the raw text of the number input; blank text counts as zero
/// when the field is optional.
pub fn validate_project_input(
    title: &str,
    description: &str,
    people: &str,
    rules: &InputRules,
) -> Result<ProjectDraft, InputError> {
    let title = validate_text("title", title, &rules.title)?;
    let description = validate_text("description", description, &rules.description)?;
    let people = validate_number("people", people, &rules.people)?;
    let people = u32::try_from(people).map_err(|_| InputError::OutOfRange {
        field: "people",
        value: people,
        min: Some(0),
        max: Some(i64::from(u32::MAX)),
    })?;

    Ok(ProjectDraft {
        title,
        description,
        people,
    })
}

/// Normalizes and checks one text field.
pub fn validate_text(
    field: &'static str,
    raw: &str,
    rule: &TextRule,
) -> Result<String, InputError> {
    let value = normalize_text(raw);
    let actual = value.chars().count();

    if rule.required && actual == 0 {
        return Err(InputError::Missing { field });
    }
    if let Some(min) = rule.min_len {
        if actual < min {
            return Err(InputError::TooShort { field, min, actual });
        }
    }
    if let Some(max) = rule.max_len {
        if actual > max {
            return Err(InputError::TooLong { field, max, actual });
        }
    }
    Ok(value)
}

/// Parses and checks one numeric field.
pub fn validate_number(
    field: &'static str,
    raw: &str,
    rule: &NumberRule,
) -> Result<i64, InputError> {
    let trimmed = raw.trim();
    let value = if trimmed.is_empty() {
        if rule.required {
            return Err(InputError::Missing { field });
        }
        0
    } else {
        trimmed.parse::<i64>().map_err(|_| InputError::NotANumber {
            field,
            value: trimmed.to_string(),
        })?
    };

    let below = rule.min.is_some_and(|min| value < min);
    let above = rule.max.is_some_and(|max| value > max);
    if below || above {
        return Err(InputError::OutOfRange {
            field,
            value,
            min: rule.min,
            max: rule.max,
        });
    }
    Ok(value)
}

fn normalize_text(raw: &str) -> String {
    WHITESPACE_RE.replace_all(raw.trim(), " ").into_owned()
}
