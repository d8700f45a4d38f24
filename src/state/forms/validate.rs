//! Field validation rules
//!
//! Validation is pure: rules read a value and a constraint and report an
//! outcome. Annotating the field on screen is the caller's job.

use super::field::{FieldConstraint, FieldKind};

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const INVALID_EMAIL_MESSAGE: &str = "Enter a valid email address.";
pub const INVALID_PHONE_MESSAGE: &str = "Enter a valid phone number.";

/// Minimum digit count a phone number must contain by default
pub const DEFAULT_MIN_PHONE_DIGITS: usize = 7;

/// Outcome of validating a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn pass() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// Applies constraint rules to field values
#[derive(Debug, Clone)]
pub struct FieldValidator {
    min_phone_digits: usize,
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self {
            min_phone_digits: DEFAULT_MIN_PHONE_DIGITS,
        }
    }
}

impl FieldValidator {
    pub fn new(min_phone_digits: usize) -> Self {
        Self { min_phone_digits }
    }

    /// Validate a value against a constraint
    ///
    /// Rules apply in order: required, kind shape, minimum length. The first
    /// failing rule decides the message. Optional fields left empty pass
    /// without any shape checks.
    pub fn validate(&self, value: &str, constraint: &FieldConstraint) -> ValidationResult {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            if constraint.required {
                return ValidationResult::fail(REQUIRED_MESSAGE);
            }
            return ValidationResult::pass();
        }

        match constraint.kind {
            FieldKind::Email => {
                if !Self::email_shape_ok(trimmed) {
                    return ValidationResult::fail(INVALID_EMAIL_MESSAGE);
                }
            }
            FieldKind::Tel => {
                if !self.phone_shape_ok(trimmed) {
                    return ValidationResult::fail(INVALID_PHONE_MESSAGE);
                }
            }
            FieldKind::Text => {}
        }

        if let Some(min) = constraint.min_length {
            if trimmed.chars().count() < min {
                return ValidationResult::fail(format!("Must be at least {min} characters."));
            }
        }

        ValidationResult::pass()
    }

    /// Structural email check: one `@`, no whitespace, non-empty local part,
    /// and a dot somewhere inside the domain
    fn email_shape_ok(value: &str) -> bool {
        if value.chars().any(char::is_whitespace) {
            return false;
        }
        if value.matches('@').count() != 1 {
            return false;
        }
        let Some((local, domain)) = value.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.is_empty() {
            return false;
        }
        domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
    }

    /// Phone numbers may carry digits, spaces, `+`, `-` and parentheses, and
    /// must contain at least the configured number of digits
    fn phone_shape_ok(&self, value: &str) -> bool {
        let allowed = value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'));
        if !allowed {
            return false;
        }
        let digits = value.chars().filter(char::is_ascii_digit).count();
        digits >= self.min_phone_digits
    }
}
