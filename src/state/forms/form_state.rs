//! Form state management and form structs

use super::field::FormField;
use std::collections::HashMap;

/// Identifies the forms the kiosk can display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormId {
    Enquiry,
    Signup,
}

impl FormId {
    /// Wire name used in submission payloads and logs
    pub fn slug(&self) -> &'static str {
        match self {
            FormId::Enquiry => "enquiry",
            FormId::Signup => "signup",
        }
    }
}

/// Trait for common form operations
///
/// The focus order runs through every input field and ends on a trailing
/// buttons row, so `field_count` is one more than the number of fields.
pub trait Form {
    fn id(&self) -> FormId;
    fn title(&self) -> &str;
    fn submit_label(&self) -> &str;
    fn success_message(&self) -> &str;
    fn fields(&self) -> &[FormField];
    fn fields_mut(&mut self) -> &mut [FormField];
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn selected_button(&self) -> usize;
    fn set_selected_button(&mut self, index: usize);

    fn field_count(&self) -> usize {
        self.fields().len() + 1
    }
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    /// Returns true if the buttons row is currently active
    fn is_buttons_row_active(&self) -> bool {
        self.active_field() == self.fields().len()
    }
    /// The field under the cursor, or None when the buttons row is active
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        let index = self.active_field();
        self.fields_mut().get_mut(index)
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields().get(index)
    }
    fn is_active_field_multiline(&self) -> bool {
        self.get_field(self.active_field())
            .is_some_and(|f| f.is_multiline)
    }
    /// Move to the next button (wraps around)
    fn next_button(&mut self) {
        self.set_selected_button((self.selected_button() + 1) % 2);
    }
    /// Move to the previous button (wraps around)
    fn prev_button(&mut self) {
        if self.selected_button() == 0 {
            self.set_selected_button(1);
        } else {
            self.set_selected_button(0);
        }
    }
    /// Clear all values and error annotations, returning focus to the top
    fn reset(&mut self) {
        for field in self.fields_mut() {
            field.clear();
        }
        self.set_active_field(0);
        self.set_selected_button(0);
    }
    /// Flatten the form into a field name to value mapping
    fn collect(&self) -> HashMap<String, String> {
        self.fields()
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }
}

// Enquiry form
#[derive(Debug, Clone)]
pub struct EnquiryForm {
    pub fields: Vec<FormField>,
    pub active_field_index: usize,
    /// Which button is selected when on the buttons row (0=Submit, 1=Clear)
    pub selected_button: usize,
}

impl EnquiryForm {
    pub fn new() -> Self {
        Self {
            fields: vec![
                FormField::text("name", "Name").required().min_length(2),
                FormField::email("email", "Email").required(),
                FormField::tel("phone", "Phone (optional)"),
                FormField::multiline("message", "Message")
                    .required()
                    .min_length(10),
            ],
            active_field_index: 0,
            selected_button: 0,
        }
    }
}

impl Default for EnquiryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for EnquiryForm {
    fn id(&self) -> FormId {
        FormId::Enquiry
    }
    fn title(&self) -> &str {
        "Enquiry"
    }
    fn submit_label(&self) -> &str {
        "Send enquiry"
    }
    fn success_message(&self) -> &str {
        "Thanks! We received your enquiry."
    }
    fn fields(&self) -> &[FormField] {
        &self.fields
    }
    fn fields_mut(&mut self) -> &mut [FormField] {
        &mut self.fields
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len());
    }
    fn selected_button(&self) -> usize {
        self.selected_button
    }
    fn set_selected_button(&mut self, index: usize) {
        self.selected_button = index.min(1);
    }
}

// Newsletter signup form
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub fields: Vec<FormField>,
    pub active_field_index: usize,
    /// Which button is selected when on the buttons row (0=Subscribe, 1=Clear)
    pub selected_button: usize,
}

impl SignupForm {
    pub fn new() -> Self {
        Self {
            fields: vec![FormField::email("email", "Email").required()],
            active_field_index: 0,
            selected_button: 0,
        }
    }
}

impl Default for SignupForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for SignupForm {
    fn id(&self) -> FormId {
        FormId::Signup
    }
    fn title(&self) -> &str {
        "Newsletter signup"
    }
    fn submit_label(&self) -> &str {
        "Subscribe"
    }
    fn success_message(&self) -> &str {
        "You're on the list! Watch your inbox."
    }
    fn fields(&self) -> &[FormField] {
        &self.fields
    }
    fn fields_mut(&mut self) -> &mut [FormField] {
        &mut self.fields
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len());
    }
    fn selected_button(&self) -> usize {
        self.selected_button
    }
    fn set_selected_button(&mut self, index: usize) {
        self.selected_button = index.min(1);
    }
}

/// All forms the kiosk keeps alive, addressable by id
#[derive(Debug, Clone, Default)]
pub struct FormSet {
    pub enquiry: EnquiryForm,
    pub signup: SignupForm,
}

impl FormSet {
    pub fn get(&self, id: FormId) -> &dyn Form {
        match id {
            FormId::Enquiry => &self.enquiry,
            FormId::Signup => &self.signup,
        }
    }

    pub fn get_mut(&mut self, id: FormId) -> &mut dyn Form {
        match id {
            FormId::Enquiry => &mut self.enquiry,
            FormId::Signup => &mut self.signup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{FieldKind, ValidationResult};

    mod enquiry_form {
        use super::*;

        #[test]
        fn test_new_has_correct_defaults() {
            let form = EnquiryForm::new();
            assert_eq!(form.active_field_index, 0);
            assert_eq!(form.selected_button, 0); // Submit button
            assert_eq!(form.fields[0].name, "name");
            assert_eq!(form.fields[1].name, "email");
            assert_eq!(form.fields[2].name, "phone");
            assert_eq!(form.fields[3].name, "message");
        }

        #[test]
        fn test_field_count_includes_buttons_row() {
            let form = EnquiryForm::new();
            assert_eq!(form.field_count(), 5);
        }

        #[test]
        fn test_constraints() {
            let form = EnquiryForm::new();
            let name = &form.fields[0];
            assert!(name.constraint.required);
            assert_eq!(name.constraint.min_length, Some(2));

            let email = &form.fields[1];
            assert!(email.constraint.required);
            assert_eq!(email.constraint.kind, FieldKind::Email);

            let phone = &form.fields[2];
            assert!(!phone.constraint.required);
            assert_eq!(phone.constraint.kind, FieldKind::Tel);

            let message = &form.fields[3];
            assert!(message.constraint.required);
            assert_eq!(message.constraint.min_length, Some(10));
            assert!(message.is_multiline);
        }

        #[test]
        fn test_next_field_cycles() {
            let mut form = EnquiryForm::new();
            for _ in 0..5 {
                form.next_field();
            }
            assert_eq!(form.active_field_index, 0); // Wrapped back
        }

        #[test]
        fn test_prev_field_wraps_to_buttons_row() {
            let mut form = EnquiryForm::new();
            form.prev_field();
            assert_eq!(form.active_field_index, 4);
            assert!(form.is_buttons_row_active());
        }

        #[test]
        fn test_buttons_row_has_no_active_field() {
            let mut form = EnquiryForm::new();
            form.set_active_field(4);
            assert!(form.get_active_field_mut().is_none());
        }

        #[test]
        fn test_next_button_wraps() {
            let mut form = EnquiryForm::new();
            form.next_button();
            assert_eq!(form.selected_button, 1);
            form.next_button();
            assert_eq!(form.selected_button, 0);
        }

        #[test]
        fn test_prev_button_wraps() {
            let mut form = EnquiryForm::new();
            form.prev_button();
            assert_eq!(form.selected_button, 1);
        }

        #[test]
        fn test_set_active_field_clamps() {
            let mut form = EnquiryForm::new();
            form.set_active_field(100);
            assert_eq!(form.active_field_index, 4);
        }

        #[test]
        fn test_reset_clears_values_errors_and_focus() {
            let mut form = EnquiryForm::new();
            form.fields[0].push_char('A');
            form.fields[1].annotate(&ValidationResult::fail("bad"));
            form.set_active_field(3);
            form.set_selected_button(1);

            form.reset();

            assert_eq!(form.fields[0].value, "");
            assert!(!form.fields[1].has_error());
            assert_eq!(form.active_field_index, 0);
            assert_eq!(form.selected_button, 0);
        }

        #[test]
        fn test_collect_maps_names_to_values() {
            let mut form = EnquiryForm::new();
            for c in "Ada".chars() {
                form.fields[0].push_char(c);
            }
            let values = form.collect();
            assert_eq!(values.get("name").map(String::as_str), Some("Ada"));
            assert_eq!(values.get("email").map(String::as_str), Some(""));
            assert_eq!(values.len(), 4);
        }

        #[test]
        fn test_is_active_field_multiline() {
            let mut form = EnquiryForm::new();
            assert!(!form.is_active_field_multiline());
            form.set_active_field(3); // message
            assert!(form.is_active_field_multiline());
            form.set_active_field(4); // buttons row
            assert!(!form.is_active_field_multiline());
        }
    }

    mod signup_form {
        use super::*;

        #[test]
        fn test_new_has_correct_defaults() {
            let form = SignupForm::new();
            assert_eq!(form.active_field_index, 0);
            assert_eq!(form.fields.len(), 1);
            assert_eq!(form.fields[0].name, "email");
            assert_eq!(form.fields[0].constraint.kind, FieldKind::Email);
            assert!(form.fields[0].constraint.required);
        }

        #[test]
        fn test_field_count_includes_buttons_row() {
            let form = SignupForm::new();
            assert_eq!(form.field_count(), 2);
        }
    }

    mod form_set {
        use super::*;

        #[test]
        fn test_get_mut_resolves_by_id() {
            let mut forms = FormSet::default();
            assert_eq!(forms.get_mut(FormId::Enquiry).id(), FormId::Enquiry);
            assert_eq!(forms.get_mut(FormId::Signup).id(), FormId::Signup);
        }

        #[test]
        fn test_slugs() {
            assert_eq!(FormId::Enquiry.slug(), "enquiry");
            assert_eq!(FormId::Signup.slug(), "signup");
        }
    }
}
