//! Form domain layer
//!
//! Type-safe form handling for the kiosk views: field values, declarative
//! constraints and the validation rules that enforce them.

mod field;
mod form_state;
mod validate;

pub use field::{FieldKind, FormField};
pub use form_state::{Form, FormId, FormSet};
pub use validate::{FieldValidator, ValidationResult, DEFAULT_MIN_PHONE_DIGITS};
