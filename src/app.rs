//! Application state and core logic

use crate::config::KioskConfig;
use crate::state::{AppState, FieldValidator, FormId, Severity, View};
use crate::submission::{SubmissionController, SubmissionEvent, SubmitAttempt};
use crate::transport::{EnquiryTransport, HttpTransport, SimulatedTransport};
use crate::ui::MENU_VIEWS;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use std::sync::Arc;

/// Toast shown at startup when no endpoint is configured
const DEMO_MODE_MESSAGE: &str = "Demo mode: submissions stay on this machine.";
/// Toast shown at startup when the endpoint fails the reachability check
const ENDPOINT_DOWN_MESSAGE: &str =
    "The enquiry endpoint is not responding. Submissions may fail.";

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Submission workflow controller
    pub submission: SubmissionController,
    /// Transport shared with the controller, kept for connectivity checks
    transport: Arc<dyn EnquiryTransport>,
    /// Venue name shown on the welcome banner
    pub venue: String,
    /// Whether the app should quit
    quit: bool,
    /// Transient status bar message
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App instance
    pub async fn new(config: &KioskConfig) -> Result<Self> {
        let endpoint = Self::configured_endpoint(config);
        let transport: Arc<dyn EnquiryTransport> = match &endpoint {
            Some(url) => Arc::new(HttpTransport::new(url.clone(), config.request_timeout())?),
            None => Arc::new(SimulatedTransport::new(
                config.simulated_latency(),
                config.simulated_failure(),
            )),
        };

        let mut app = Self::with_transport(config, transport);
        app.state.backend_connected = app.transport.check_connection().await;
        tracing::info!(
            transport = %app.transport.describe(),
            connected = app.state.backend_connected,
            "kiosk ready"
        );

        if endpoint.is_none() {
            app.state.notifications.show(DEMO_MODE_MESSAGE, Severity::Info);
        } else if !app.state.backend_connected {
            app.state.notifications.show(ENDPOINT_DOWN_MESSAGE, Severity::Warning);
        }

        Ok(app)
    }

    fn with_transport(config: &KioskConfig, transport: Arc<dyn EnquiryTransport>) -> Self {
        let validator = FieldValidator::new(config.min_phone_digits());
        let submission = SubmissionController::new(Arc::clone(&transport), validator);

        Self {
            state: AppState::new(config.notification_timeout()),
            submission,
            transport,
            venue: config.venue_name().to_string(),
            quit: false,
            status_message: None,
        }
    }

    /// The endpoint to deliver to, with the environment taking precedence
    fn configured_endpoint(config: &KioskConfig) -> Option<String> {
        std::env::var("FOYER_ENDPOINT")
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| config.endpoint.clone())
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Whether something on screen needs the fast redraw cadence
    pub fn animation_active(&self) -> bool {
        self.state.notifications.is_animating() || self.submission.has_in_flight()
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Esc closes a live toast before anything else sees the key
        if key.code == KeyCode::Esc && self.state.notifications.is_live() {
            self.state.notifications.dismiss();
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        // Menu captures input while open
        if self.state.nav.menu_open {
            self.handle_menu_key(key);
            return Ok(());
        }

        if let Some(form_id) = self.state.current_view.form_id() {
            self.handle_form_key(form_id, key);
        } else {
            self.handle_welcome_key(key);
        }
        Ok(())
    }

    /// Handle keys while the menu panel is open
    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('m') => self.state.nav.close_menu(),
            KeyCode::Up | KeyCode::Char('k') => self.state.nav.menu_prev(MENU_VIEWS.len()),
            KeyCode::Down | KeyCode::Char('j') => self.state.nav.menu_next(MENU_VIEWS.len()),
            KeyCode::Enter => {
                if let Some(view) = MENU_VIEWS.get(self.state.nav.menu_index).copied() {
                    self.state.navigate_to(view);
                }
            }
            _ => {}
        }
    }

    /// Handle keys in the Welcome view
    fn handle_welcome_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('m') => self.open_menu(),
            KeyCode::Char('e') => self.state.navigate_to(View::Enquiry),
            KeyCode::Char('n') => self.state.navigate_to(View::Signup),
            KeyCode::Down | KeyCode::Char('j') => self.state.nav.scroll_down(),
            KeyCode::Up | KeyCode::Char('k') => self.state.nav.scroll_up(),
            KeyCode::PageDown | KeyCode::Char('d') => self.state.nav.scroll_down_page(),
            KeyCode::PageUp | KeyCode::Char('u') => self.state.nav.scroll_up_page(),
            KeyCode::Home | KeyCode::Char('g') => self.state.nav.reset_scroll(),
            KeyCode::Char('y') => self.copy_last_receipt(),
            _ => {}
        }
    }

    fn open_menu(&mut self) {
        // Highlight the entry for wherever we are
        self.state.nav.menu_index = MENU_VIEWS
            .iter()
            .position(|v| *v == self.state.current_view)
            .unwrap_or(0);
        self.state.nav.toggle_menu();
    }

    /// Handle keys in a form view
    fn handle_form_key(&mut self, form_id: FormId, key: KeyEvent) {
        let on_buttons = self.state.forms.get(form_id).is_buttons_row_active();

        match key.code {
            // Submit shortcut works from anywhere in the form
            KeyCode::Char('s')
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    || key.modifiers.contains(crate::platform::ACTION_MODIFIER) =>
            {
                self.request_submit(form_id);
            }
            KeyCode::Tab => {
                self.blur_active_field(form_id);
                self.state.forms.get_mut(form_id).next_field();
            }
            KeyCode::BackTab => {
                self.blur_active_field(form_id);
                self.state.forms.get_mut(form_id).prev_field();
            }
            KeyCode::Left | KeyCode::Char('h') if on_buttons => {
                self.state.forms.get_mut(form_id).prev_button();
            }
            KeyCode::Right | KeyCode::Char('l') if on_buttons => {
                self.state.forms.get_mut(form_id).next_button();
            }
            // Enter on the buttons row triggers the selected button
            // Button order: 0=Submit, 1=Clear
            KeyCode::Enter if on_buttons => {
                match self.state.forms.get(form_id).selected_button() {
                    0 => self.request_submit(form_id),
                    // Clear is drawn disabled while a delivery runs
                    1 if !self.submission.is_submitting(form_id) => self.clear_form(form_id),
                    _ => {}
                }
            }
            // Leave the form; entered values survive for when the guest returns
            KeyCode::Esc => self.state.navigate_to(View::Welcome),
            // Field input (only when not on the buttons row)
            KeyCode::Char(c) if !on_buttons => {
                if let Some(field) = self.state.forms.get_mut(form_id).get_active_field_mut() {
                    field.push_char(c);
                }
            }
            KeyCode::Backspace if !on_buttons => {
                if let Some(field) = self.state.forms.get_mut(form_id).get_active_field_mut() {
                    field.pop_char();
                }
            }
            KeyCode::Enter if !on_buttons => {
                // Enter adds a newline in multiline fields, otherwise advances
                let form = self.state.forms.get_mut(form_id);
                if form.is_active_field_multiline() {
                    if let Some(field) = form.get_active_field_mut() {
                        field.push_char('\n');
                    }
                } else {
                    self.blur_active_field(form_id);
                    self.state.forms.get_mut(form_id).next_field();
                }
            }
            _ => {}
        }
    }

    /// Validate the field being left so feedback appears as focus moves on
    fn blur_active_field(&mut self, form_id: FormId) {
        if let Some(field) = self.state.forms.get_mut(form_id).get_active_field_mut() {
            self.submission.validate_field(field);
        }
    }

    fn request_submit(&mut self, form_id: FormId) {
        let attempt = self.submission
            .submit(self.state.forms.get_mut(form_id), &mut self.state.notifications);

        match attempt {
            SubmitAttempt::Started | SubmitAttempt::InFlight => {}
            SubmitAttempt::Rejected { invalid_fields } => {
                tracing::debug!(
                    form = form_id.slug(),
                    invalid_fields,
                    "submission blocked by validation"
                );
                // Jump focus to the first field needing attention
                let form = self.state.forms.get_mut(form_id);
                if let Some(index) = form.fields().iter().position(|f| f.has_error()) {
                    form.set_active_field(index);
                }
            }
        }
    }

    fn clear_form(&mut self, form_id: FormId) {
        self.state.forms.get_mut(form_id).reset();
        self.status_message = Some("Form cleared".to_string());
    }

    /// Settle notification timers and any finished delivery
    pub async fn tick(&mut self) {
        self.state.notifications.tick();
        if let Some(event) = self.submission
            .poll(&mut self.state.forms, &mut self.state.notifications)
            .await
        {
            self.apply_submission_event(event);
        }
    }

    /// Wait out deliveries that already left their form (used on quit)
    pub async fn flush_pending(&mut self) {
        while let Some(event) = self.submission
            .drain(&mut self.state.forms, &mut self.state.notifications)
            .await
        {
            self.apply_submission_event(event);
        }
    }

    fn apply_submission_event(&mut self, event: SubmissionEvent) {
        match event {
            SubmissionEvent::Delivered { form, receipt } => {
                tracing::info!(
                    form = form.slug(),
                    reference = %receipt.reference,
                    "submission acknowledged"
                );
                self.state.last_receipt = Some(receipt);
            }
            SubmissionEvent::Failed { form } => {
                tracing::debug!(form = form.slug(), "submission failed, form kept for retry");
            }
        }
    }

    pub async fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        self.status_message = None;

        match mouse.kind {
            MouseEventKind::ScrollDown if self.state.current_view == View::Welcome => {
                self.state.nav.scroll_down();
            }
            MouseEventKind::ScrollUp if self.state.current_view == View::Welcome => {
                self.state.nav.scroll_up();
            }
            _ => {}
        }
        Ok(())
    }

    /// Copy the reference of the last delivered submission
    fn copy_last_receipt(&mut self) {
        let Some(receipt) = self.state.last_receipt.clone() else {
            self.status_message = Some("No reference to copy yet".to_string());
            return;
        };

        match self.copy_to_clipboard(&receipt.reference) {
            Ok(()) => {
                self.status_message = Some(format!("Copied reference {}", receipt.reference));
            }
            Err(err) => {
                tracing::warn!(error = %err, "clipboard unavailable");
                self.status_message = Some("Clipboard unavailable".to_string());
            }
        }
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ToastPhase;
    use crate::transport::{MockEnquiryTransport, SubmissionReceipt};
    use std::time::{Duration, Instant};

    fn delivering_mock() -> MockEnquiryTransport {
        let mut mock = MockEnquiryTransport::new();
        mock.expect_deliver().returning(|submission| {
            Ok(SubmissionReceipt {
                reference: submission.reference.to_string(),
            })
        });
        mock
    }

    fn test_app() -> App {
        App::with_transport(&KioskConfig::default(), Arc::new(delivering_mock()))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    fn fill_enquiry(app: &mut App) {
        app.state.forms.enquiry.fields[0].value = "Ada Lovelace".to_string();
        app.state.forms.enquiry.fields[1].value = "ada@example.com".to_string();
        app.state.forms.enquiry.fields[3].value = "Do you run evening classes?".to_string();
    }

    #[tokio::test]
    async fn test_typing_fills_active_field() {
        let mut app = test_app();
        app.state.navigate_to(View::Enquiry);

        type_str(&mut app, "Ada").await;
        assert_eq!(app.state.forms.enquiry.fields[0].value, "Ada");

        app.handle_key(key(KeyCode::Backspace)).await.unwrap();
        assert_eq!(app.state.forms.enquiry.fields[0].value, "Ad");
    }

    #[tokio::test]
    async fn test_tab_advances_and_validates_left_field() {
        let mut app = test_app();
        app.state.navigate_to(View::Enquiry);

        // Leaving the required name field empty annotates it
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        assert_eq!(app.state.forms.enquiry.active_field_index, 1);
        assert!(app.state.forms.enquiry.fields[0].has_error());
    }

    #[tokio::test]
    async fn test_blur_clears_error_once_fixed() {
        let mut app = test_app();
        app.state.navigate_to(View::Enquiry);

        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        assert!(app.state.forms.enquiry.fields[0].has_error());

        app.handle_key(key(KeyCode::BackTab)).await.unwrap();
        type_str(&mut app, "Ada").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        assert!(!app.state.forms.enquiry.fields[0].has_error());
    }

    #[tokio::test]
    async fn test_enter_on_single_line_field_advances() {
        let mut app = test_app();
        app.state.navigate_to(View::Enquiry);

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.forms.enquiry.active_field_index, 1);
    }

    #[tokio::test]
    async fn test_enter_in_message_field_adds_newline() {
        let mut app = test_app();
        app.state.navigate_to(View::Enquiry);
        app.state.forms.enquiry.active_field_index = 3;

        type_str(&mut app, "Hi").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        type_str(&mut app, "there").await;

        assert_eq!(app.state.forms.enquiry.fields[3].value, "Hi\nthere");
        assert_eq!(app.state.forms.enquiry.active_field_index, 3);
    }

    #[tokio::test]
    async fn test_esc_returns_to_welcome_keeping_values() {
        let mut app = test_app();
        app.state.navigate_to(View::Enquiry);
        type_str(&mut app, "Ada").await;

        app.handle_key(key(KeyCode::Esc)).await.unwrap();

        assert_eq!(app.state.current_view, View::Welcome);
        assert_eq!(app.state.forms.enquiry.fields[0].value, "Ada");
    }

    #[tokio::test]
    async fn test_esc_dismisses_toast_before_leaving_form() {
        let mut app = test_app();
        app.state.navigate_to(View::Enquiry);
        app.state.notifications.show("Saved", Severity::Success);

        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.state.current_view, View::Enquiry);
        let toast = app.state.notifications.display().unwrap();
        assert_eq!(toast.phase, ToastPhase::SlideOut);

        // Once the toast is gone, Esc navigates again
        app.state
            .notifications
            .advance(Instant::now() + Duration::from_secs(1));
        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.state.current_view, View::Welcome);
    }

    #[tokio::test]
    async fn test_ctrl_s_submits_from_any_field() {
        let mut app = test_app();
        app.state.navigate_to(View::Enquiry);
        fill_enquiry(&mut app);

        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
            .await
            .unwrap();

        assert!(app.submission.is_submitting(FormId::Enquiry));
        app.flush_pending().await;
    }

    #[tokio::test]
    async fn test_submit_button_starts_delivery() {
        let mut app = test_app();
        app.state.navigate_to(View::Enquiry);
        fill_enquiry(&mut app);
        app.state.forms.enquiry.active_field_index = 4; // buttons row

        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert!(app.submission.is_submitting(FormId::Enquiry));
        app.flush_pending().await;
        assert!(app.state.last_receipt.is_some());
        assert_eq!(app.state.forms.enquiry.fields[0].value, "");
    }

    #[tokio::test]
    async fn test_clear_button_resets_form() {
        let mut app = test_app();
        app.state.navigate_to(View::Enquiry);
        fill_enquiry(&mut app);
        app.state.forms.enquiry.active_field_index = 4;

        app.handle_key(key(KeyCode::Right)).await.unwrap(); // select Clear
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert_eq!(app.state.forms.enquiry.fields[0].value, "");
        assert_eq!(app.status_message.as_deref(), Some("Form cleared"));
        assert!(!app.submission.is_submitting(FormId::Enquiry));
    }

    #[tokio::test]
    async fn test_clear_button_ignored_while_submitting() {
        let mut app = test_app();
        app.state.navigate_to(View::Enquiry);
        fill_enquiry(&mut app);
        app.state.forms.enquiry.active_field_index = 4;

        app.handle_key(key(KeyCode::Enter)).await.unwrap(); // Submit
        assert!(app.submission.is_submitting(FormId::Enquiry));

        app.handle_key(key(KeyCode::Right)).await.unwrap(); // select Clear
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        // The guest's values survive until the delivery settles
        assert_eq!(app.state.forms.enquiry.fields[0].value, "Ada Lovelace");
        assert!(app.status_message.is_none());

        app.flush_pending().await;
    }

    #[tokio::test]
    async fn test_rejected_submit_focuses_first_invalid_field() {
        let mut app = test_app();
        app.state.navigate_to(View::Enquiry);
        app.state.forms.enquiry.fields[0].value = "Ada Lovelace".to_string();
        app.state.forms.enquiry.active_field_index = 4;

        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        // Email is the first field failing validation
        assert_eq!(app.state.forms.enquiry.active_field_index, 1);
        assert!(!app.submission.is_submitting(FormId::Enquiry));
    }

    #[tokio::test]
    async fn test_tick_records_receipt_after_delivery() {
        let mut app = test_app();
        app.state.navigate_to(View::Enquiry);
        fill_enquiry(&mut app);
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
            .await
            .unwrap();

        // Let the spawned delivery task run to completion
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        app.tick().await;

        assert!(app.state.last_receipt.is_some());
        assert!(!app.submission.is_submitting(FormId::Enquiry));
    }

    #[tokio::test]
    async fn test_menu_opens_navigates_and_closes() {
        let mut app = test_app();

        app.handle_key(key(KeyCode::Char('m'))).await.unwrap();
        assert!(app.state.nav.menu_open);
        assert_eq!(app.state.nav.menu_index, 0);

        app.handle_key(key(KeyCode::Char('j'))).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert_eq!(app.state.current_view, View::Enquiry);
        assert!(!app.state.nav.menu_open);
    }

    #[tokio::test]
    async fn test_menu_esc_closes_without_navigating() {
        let mut app = test_app();

        app.handle_key(key(KeyCode::Char('m'))).await.unwrap();
        app.handle_key(key(KeyCode::Esc)).await.unwrap();

        assert!(!app.state.nav.menu_open);
        assert_eq!(app.state.current_view, View::Welcome);
    }

    #[tokio::test]
    async fn test_menu_highlights_current_view_on_open() {
        let mut app = test_app();
        app.state.current_view = View::Signup;

        app.open_menu();
        assert_eq!(app.state.nav.menu_index, 2);
    }

    #[tokio::test]
    async fn test_welcome_scroll_condenses_header() {
        let mut app = test_app();

        for _ in 0..5 {
            app.handle_key(key(KeyCode::Char('j'))).await.unwrap();
        }
        assert_eq!(app.state.nav.scroll_offset, 5);
        assert!(app.state.nav.header_condensed());

        app.handle_key(key(KeyCode::Char('g'))).await.unwrap();
        assert!(!app.state.nav.header_condensed());
    }

    #[tokio::test]
    async fn test_mouse_wheel_scrolls_welcome() {
        let mut app = test_app();
        let mouse = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };

        app.handle_mouse(mouse).await.unwrap();
        assert_eq!(app.state.nav.scroll_offset, 1);
    }

    #[tokio::test]
    async fn test_copy_without_receipt_sets_status() {
        let mut app = test_app();

        app.handle_key(key(KeyCode::Char('y'))).await.unwrap();
        assert_eq!(app.status_message.as_deref(), Some("No reference to copy yet"));
    }

    #[tokio::test]
    async fn test_status_message_clears_on_next_key() {
        let mut app = test_app();
        app.status_message = Some("Form cleared".to_string());

        app.handle_key(key(KeyCode::Char('j'))).await.unwrap();
        assert!(app.status_message.is_none());
    }

    #[tokio::test]
    async fn test_animation_active_while_submitting() {
        let mut app = test_app();
        app.state.navigate_to(View::Enquiry);
        fill_enquiry(&mut app);

        assert!(!app.submission.has_in_flight());
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
            .await
            .unwrap();
        assert!(app.animation_active());

        app.flush_pending().await;
    }

    #[tokio::test]
    async fn test_quit_flag() {
        let mut app = test_app();
        assert!(!app.should_quit());
        app.request_quit();
        assert!(app.should_quit());
    }
}
