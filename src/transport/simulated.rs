//! Stand-in transport used when no endpoint is configured
//!
//! Lets the kiosk run as an offline demo: deliveries take a believable
//! moment and succeed, or fail on demand when exercising the error path.

use super::traits::{EnquiryTransport, Submission, SubmissionReceipt, TransportError};
use async_trait::async_trait;
use std::time::Duration;

/// Pretends to deliver submissions after a short delay
pub struct SimulatedTransport {
    latency: Duration,
    fail: bool,
}

impl SimulatedTransport {
    pub fn new(latency: Duration, fail: bool) -> Self {
        Self { latency, fail }
    }
}

#[async_trait]
impl EnquiryTransport for SimulatedTransport {
    async fn check_connection(&self) -> bool {
        true
    }

    async fn deliver(&self, submission: Submission) -> Result<SubmissionReceipt, TransportError> {
        tokio::time::sleep(self.latency).await;

        if self.fail {
            return Err(TransportError::Simulated);
        }

        Ok(SubmissionReceipt {
            reference: submission.reference.to_string(),
        })
    }

    fn describe(&self) -> String {
        "simulated (no endpoint configured)".to_string()
    }
}
