//! HTTP transport for delivering submissions to a configured endpoint
//!
//! Submissions go out as a JSON POST. A 2xx response with a JSON body is
//! parsed as a receipt; an empty 2xx body gets the client reference echoed
//! back instead, since simple endpoints often acknowledge with 204.

use super::traits::{EnquiryTransport, Submission, SubmissionReceipt, TransportError};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Delivers submissions to an HTTP endpoint
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {e}"))?;

        Ok(Self { client, endpoint })
    }

    fn classify(err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Unreachable(err.to_string())
        }
    }
}

#[async_trait]
impl EnquiryTransport for HttpTransport {
    /// Any HTTP response counts as reachable; only network errors count as down
    async fn check_connection(&self) -> bool {
        self.client.get(&self.endpoint).send().await.is_ok()
    }

    async fn deliver(&self, submission: Submission) -> Result<SubmissionReceipt, TransportError> {
        let response = self.client
            .post(&self.endpoint)
            .json(&submission)
            .send()
            .await
            .map_err(Self::classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Rejected {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(Self::classify)?;
        if body.trim().is_empty() {
            return Ok(SubmissionReceipt {
                reference: submission.reference.to_string(),
            });
        }

        serde_json::from_str(&body).map_err(|e| TransportError::InvalidResponse(e.to_string()))
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}
