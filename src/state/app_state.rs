//! Application state definitions

use crate::state::forms::{FormId, FormSet};
use crate::state::navigation::NavigationState;
use crate::state::notifications::NotificationCenter;
use crate::transport::SubmissionReceipt;
use std::time::Duration;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Welcome,
    Enquiry,
    Signup,
}

impl View {
    /// Label shown in the menu and status bar
    pub fn label(&self) -> &'static str {
        match self {
            View::Welcome => "Welcome",
            View::Enquiry => "Enquiry",
            View::Signup => "Newsletter",
        }
    }

    /// The form displayed in this view, if any
    pub fn form_id(&self) -> Option<FormId> {
        match self {
            View::Welcome => None,
            View::Enquiry => Some(FormId::Enquiry),
            View::Signup => Some(FormId::Signup),
        }
    }
}

/// Main application state
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub nav: NavigationState,

    // Forms
    pub forms: FormSet,

    // Notifications
    pub notifications: NotificationCenter,

    // Backend
    pub backend_connected: bool,
    pub last_receipt: Option<SubmissionReceipt>,
}

impl AppState {
    pub fn new(toast_visible_for: Duration) -> Self {
        Self {
            current_view: View::default(),
            nav: NavigationState::default(),
            forms: FormSet::default(),
            notifications: NotificationCenter::new(toast_visible_for),
            backend_connected: false,
            last_receipt: None,
        }
    }

    /// Switch views, closing the menu and resetting scroll
    pub fn navigate_to(&mut self, view: View) {
        self.current_view = view;
        self.nav.close_menu();
        self.nav.reset_scroll();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(NotificationCenter::DEFAULT_VISIBLE_FOR)
    }
}
