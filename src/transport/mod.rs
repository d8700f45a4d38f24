//! Submission transport module
//!
//! Delivery of completed forms to the enquiry backend: over HTTP when an
//! endpoint is configured, simulated otherwise.

mod http;
mod simulated;
mod traits;

pub use http::HttpTransport;
pub use simulated::SimulatedTransport;
pub use traits::{EnquiryTransport, Submission, SubmissionReceipt, TransportError};

#[cfg(test)]
pub use traits::MockEnquiryTransport;
