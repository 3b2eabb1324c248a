//! Prediction client for the disease-risk inference service.

pub mod client;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use client::*;
pub use types::{format_probability, normalize_predictions, ServiceStatus};

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("Inference service did not respond within {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Inference service is not reachable at {url}: {reason}")]
    Unavailable { url: String, reason: String },

    #[error("Inference service returned error (status {status}): {body}")]
    Response { status: u16, body: String },

    #[error("Malformed inference response: {0}")]
    Malformed(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}
