//! Submission workflow
//!
//! One controller owns the lifecycle of every form submission: validate the
//! fields, hand the payload to the transport on a background task, then
//! settle the outcome on a later tick. At most one delivery per form is in
//! flight; submit requests for a form that is already delivering are
//! ignored. Whatever the outcome, including an aborted task, the form ends
//! the cycle back in `Idle` so the kiosk can never wedge mid-submit.

use crate::state::{FieldValidator, Form, FormField, FormId, FormSet, NotificationCenter, Severity};
use crate::transport::{EnquiryTransport, Submission, SubmissionReceipt, TransportError};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;

/// Toast shown when validation blocks a submission
pub const VALIDATION_FAILED_MESSAGE: &str = "Please correct the highlighted fields.";
/// Toast shown when delivery fails for any reason
pub const DELIVERY_FAILED_MESSAGE: &str = "Something went wrong. Please try again.";

/// Lifecycle of one form's submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// What happened when a submit was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// Validation passed and delivery started in the background
    Started,
    /// Validation blocked the submission
    Rejected { invalid_fields: usize },
    /// A delivery for this form is already running
    InFlight,
}

/// Outcome of a finished delivery, reported by `poll` or `drain`
#[derive(Debug)]
pub enum SubmissionEvent {
    Delivered {
        form: FormId,
        receipt: SubmissionReceipt,
    },
    Failed {
        form: FormId,
    },
}

struct InFlight {
    form: FormId,
    started: Instant,
    handle: JoinHandle<Result<SubmissionReceipt, TransportError>>,
}

/// Orchestrates validation and delivery for all forms
pub struct SubmissionController {
    transport: Arc<dyn EnquiryTransport>,
    validator: FieldValidator,
    states: HashMap<FormId, SubmissionState>,
    in_flight: Vec<InFlight>,
}

impl SubmissionController {
    pub fn new(transport: Arc<dyn EnquiryTransport>, validator: FieldValidator) -> Self {
        Self {
            transport,
            validator,
            states: HashMap::new(),
            in_flight: Vec::new(),
        }
    }

    /// Current lifecycle state for a form
    pub fn state(&self, form: FormId) -> SubmissionState {
        self.states.get(&form).copied().unwrap_or_default()
    }

    /// Whether a delivery for this form is still running
    pub fn is_submitting(&self, form: FormId) -> bool {
        self.state(form) == SubmissionState::Submitting
    }

    /// When the running delivery for this form started, if any
    pub fn submitting_since(&self, form: FormId) -> Option<Instant> {
        self.in_flight
            .iter()
            .find(|f| f.form == form)
            .map(|f| f.started)
    }

    /// Whether any form has a delivery in flight
    pub fn has_in_flight(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Validate a single field and update its error annotation
    pub fn validate_field(&self, field: &mut FormField) {
        let result = self.validator.validate(&field.value, &field.constraint);
        field.annotate(&result);
    }

    /// Request a submission of the given form
    ///
    /// Runs every field through the validator and annotates it either way.
    /// On a clean pass the payload is handed to the transport on a spawned
    /// task and the form enters `Submitting` until `poll` settles it.
    pub fn submit(
        &mut self,
        form: &mut dyn Form,
        notifications: &mut NotificationCenter,
    ) -> SubmitAttempt {
        let id = form.id();
        if self.is_submitting(id) {
            return SubmitAttempt::InFlight;
        }

        self.transition(id, SubmissionState::Validating);
        let mut invalid_fields = 0;
        for field in form.fields_mut() {
            let result = self.validator.validate(&field.value, &field.constraint);
            if !result.valid {
                invalid_fields += 1;
            }
            field.annotate(&result);
        }

        if invalid_fields > 0 {
            notifications.show(VALIDATION_FAILED_MESSAGE, Severity::Error);
            self.transition(id, SubmissionState::Failed);
            self.transition(id, SubmissionState::Idle);
            return SubmitAttempt::Rejected { invalid_fields };
        }

        let submission = Submission::new(id.slug(), form.collect());
        tracing::info!(
            form = id.slug(),
            reference = %submission.reference,
            "delivering submission"
        );

        let transport = Arc::clone(&self.transport);
        let handle = tokio::spawn(async move { transport.deliver(submission).await });
        self.in_flight.push(InFlight {
            form: id,
            started: Instant::now(),
            handle,
        });
        self.transition(id, SubmissionState::Submitting);
        SubmitAttempt::Started
    }

    /// Settle any delivery that has finished, without blocking on ones that
    /// have not
    pub async fn poll(
        &mut self,
        forms: &mut FormSet,
        notifications: &mut NotificationCenter,
    ) -> Option<SubmissionEvent> {
        let index = self.in_flight.iter().position(|f| f.handle.is_finished())?;
        let flight = self.in_flight.swap_remove(index);
        Some(self.settle(flight, forms, notifications).await)
    }

    /// Wait for the oldest in-flight delivery to finish and settle it
    ///
    /// Used on shutdown so a submission that already left the form is not
    /// abandoned; call in a loop to flush everything.
    pub async fn drain(
        &mut self,
        forms: &mut FormSet,
        notifications: &mut NotificationCenter,
    ) -> Option<SubmissionEvent> {
        if self.in_flight.is_empty() {
            return None;
        }
        let flight = self.in_flight.remove(0);
        Some(self.settle(flight, forms, notifications).await)
    }

    async fn settle(
        &mut self,
        flight: InFlight,
        forms: &mut FormSet,
        notifications: &mut NotificationCenter,
    ) -> SubmissionEvent {
        let form = flight.form;
        let elapsed = flight.started.elapsed();

        match flight.handle.await {
            Ok(Ok(receipt)) => {
                tracing::info!(
                    form = form.slug(),
                    reference = %receipt.reference,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "submission delivered"
                );
                let target = forms.get_mut(form);
                let message = target.success_message().to_string();
                target.reset();
                notifications.show(message, Severity::Success);
                self.transition(form, SubmissionState::Succeeded);
                self.transition(form, SubmissionState::Idle);
                SubmissionEvent::Delivered { form, receipt }
            }
            Ok(Err(err)) => {
                tracing::error!(form = form.slug(), error = %err, "submission delivery failed");
                self.settle_failure(form, notifications)
            }
            Err(err) => {
                // A panicked or aborted delivery task still hands the form back
                tracing::error!(form = form.slug(), error = %err, "submission task aborted");
                self.settle_failure(form, notifications)
            }
        }
    }

    fn settle_failure(
        &mut self,
        form: FormId,
        notifications: &mut NotificationCenter,
    ) -> SubmissionEvent {
        notifications.show(DELIVERY_FAILED_MESSAGE, Severity::Error);
        self.transition(form, SubmissionState::Failed);
        self.transition(form, SubmissionState::Idle);
        SubmissionEvent::Failed { form }
    }

    fn transition(&mut self, form: FormId, next: SubmissionState) {
        tracing::debug!(form = form.slug(), state = ?next, "submission state");
        self.states.insert(form, next);
    }
}
