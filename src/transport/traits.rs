//! Trait abstraction for submission transports to enable mocking in tests

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// A completed form on its way to the backend
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    /// Client-side reference, echoed back by backends that do not mint their own
    pub reference: Uuid,
    /// Wire name of the form that produced this submission
    pub form: String,
    pub submitted_at: DateTime<Utc>,
    pub fields: HashMap<String, String>,
}

impl Submission {
    pub fn new(form: &str, fields: HashMap<String, String>) -> Self {
        Self {
            reference: Uuid::new_v4(),
            form: form.to_string(),
            submitted_at: Utc::now(),
            fields,
        }
    }
}

/// Acknowledgement returned once a submission lands
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionReceipt {
    /// Reference the guest can quote when following up
    pub reference: String,
}

/// Errors a transport can report while delivering a submission
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("endpoint unreachable: {0}")]
    Unreachable(String),
    #[error("request timed out")]
    Timeout,
    #[error("endpoint rejected the submission (status {status})")]
    Rejected { status: u16 },
    #[error("invalid response from endpoint: {0}")]
    InvalidResponse(String),
    #[error("simulated delivery failure")]
    Simulated,
}

/// Trait for submission delivery, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnquiryTransport: Send + Sync {
    /// Check if the backend is reachable
    async fn check_connection(&self) -> bool;

    /// Deliver a submission and wait for the acknowledgement
    async fn deliver(&self, submission: Submission) -> Result<SubmissionReceipt, TransportError>;

    /// Human-readable description for the status bar and logs
    fn describe(&self) -> String;
}
