use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::dom::{FieldKind, FieldRef};

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your name.")]
    Name,
    #[error("Please enter a valid email address.")]
    Email,
    #[error("Please let us know if you can attend.")]
    Attendance,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

fn trimmed_value(fields: &[FieldRef], name: &str) -> String {
    fields
        .iter()
        .find(|field| field.name() == name && !field.kind().is_choice())
        .map(|field| field.value().trim().to_string())
        .unwrap_or_default()
}

/// First failing rule wins: name, then email, then attendance.
pub fn validate(fields: &[FieldRef]) -> Result<(), ValidationError> {
    if trimmed_value(fields, "name").is_empty() {
        return Err(ValidationError::Name);
    }
    let email = trimmed_value(fields, "email");
    if email.is_empty() || !is_valid_email(&email) {
        return Err(ValidationError::Email);
    }
    let answered = fields
        .iter()
        .any(|field| field.name() == "attendance" && field.is_checked());
    if !answered {
        return Err(ValidationError::Attendance);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFeedback {
    Invalid,
    Neutral,
}

/// Verdict for a single control when it loses focus.
pub fn blur_feedback(kind: &FieldKind, required: bool, value: &str) -> FieldFeedback {
    if required && value.trim().is_empty() {
        FieldFeedback::Invalid
    } else if *kind == FieldKind::Email && !value.is_empty() && !is_valid_email(value) {
        FieldFeedback::Invalid
    } else {
        FieldFeedback::Neutral
    }
}
