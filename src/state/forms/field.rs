//! Form field value objects

use super::validate::ValidationResult;

/// How a field's content is interpreted when validating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Tel,
}

/// Declarative validation constraints attached to a field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldConstraint {
    pub required: bool,
    pub kind: FieldKind,
    pub min_length: Option<usize>,
}

impl FieldConstraint {
    /// Set a minimum length; zero means no constraint
    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = if min == 0 { None } else { Some(min) };
        self
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: String,
    pub constraint: FieldConstraint,
    pub error: Option<String>,
    pub is_multiline: bool,
}

impl FormField {
    /// Create a new single-line text field
    pub fn text(name: &str, label: &str) -> Self {
        Self::with_kind(name, label, FieldKind::Text, false)
    }

    /// Create a new multi-line text field
    pub fn multiline(name: &str, label: &str) -> Self {
        Self::with_kind(name, label, FieldKind::Text, true)
    }

    /// Create a new email field
    pub fn email(name: &str, label: &str) -> Self {
        Self::with_kind(name, label, FieldKind::Email, false)
    }

    /// Create a new telephone field
    pub fn tel(name: &str, label: &str) -> Self {
        Self::with_kind(name, label, FieldKind::Tel, false)
    }

    fn with_kind(name: &str, label: &str, kind: FieldKind, is_multiline: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: String::new(),
            constraint: FieldConstraint {
                kind,
                ..FieldConstraint::default()
            },
            error: None,
            is_multiline,
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.constraint.required = true;
        self
    }

    /// Require a minimum number of characters; zero disables the check
    pub fn min_length(mut self, min: usize) -> Self {
        self.constraint = self.constraint.with_min_length(min);
        self
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    /// Clear the field value and any error annotation
    pub fn clear(&mut self) {
        self.value.clear();
        self.error = None;
    }

    /// Apply a validation outcome to the field's error annotation
    pub fn annotate(&mut self, result: &ValidationResult) {
        self.error = if result.valid {
            None
        } else {
            result.message.clone()
        };
    }

    /// Whether the field currently carries an error annotation
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        self.value.clone()
    }
}
