//! API error types with structured JSON responses.
//!
//! Each failure kind maps to its own status code; storage faults are
//! logged and reported with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::db::DatabaseError;
use crate::pipeline::prediction::PredictionError;
use crate::pipeline::SubmissionError;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: &'static str,
    pub error: String,
    pub code: &'static str,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthorized,
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Invalid health data: {0}")]
    Validation(String),
    #[error("Prediction service timed out: {0}")]
    UpstreamTimeout(String),
    #[error("Prediction service unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("Prediction service error: {0}")]
    UpstreamResponse(String),
    #[error("Prediction service response malformed: {0}")]
    UpstreamMalformed(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, &'static str) {
        match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "AUTH_REQUIRED",
                "Authentication required",
            ),
            ApiError::BadRequest(_) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                "Request body could not be read",
            ),
            ApiError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION",
                "Invalid health data",
            ),
            ApiError::UpstreamTimeout(_) => (
                StatusCode::GATEWAY_TIMEOUT,
                "UPSTREAM_TIMEOUT",
                "Prediction service did not respond in time",
            ),
            ApiError::UpstreamUnavailable(_) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_UNAVAILABLE",
                "Prediction service is unavailable",
            ),
            ApiError::UpstreamResponse(_) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "Prediction service returned an error",
            ),
            ApiError::UpstreamMalformed(_) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_MALFORMED",
                "Prediction service returned an unexpected response",
            ),
            ApiError::Persistence(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PERSISTENCE",
                "Error saving or loading health records",
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let error = match self {
            ApiError::Unauthorized => "Missing authenticated user".to_string(),
            ApiError::Persistence(detail) => {
                tracing::error!(detail = %detail, "API persistence error");
                "An internal error occurred".to_string()
            }
            ApiError::BadRequest(detail)
            | ApiError::Validation(detail)
            | ApiError::UpstreamTimeout(detail)
            | ApiError::UpstreamUnavailable(detail)
            | ApiError::UpstreamResponse(detail)
            | ApiError::UpstreamMalformed(detail) => detail,
        };

        (status, Json(ErrorBody { message, error, code })).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::ConstraintViolation(detail) => ApiError::Validation(detail),
            other => ApiError::Persistence(other.to_string()),
        }
    }
}

impl From<PredictionError> for ApiError {
    fn from(err: PredictionError) -> Self {
        let detail = err.to_string();
        match err {
            PredictionError::Timeout(_) => ApiError::UpstreamTimeout(detail),
            PredictionError::Unavailable { .. } => ApiError::UpstreamUnavailable(detail),
            PredictionError::Response { .. } => ApiError::UpstreamResponse(detail),
            PredictionError::Malformed(_) => ApiError::UpstreamMalformed(detail),
            PredictionError::HttpClient(_) => ApiError::UpstreamUnavailable(detail),
        }
    }
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::Validation(e) => ApiError::Validation(e.to_string()),
            SubmissionError::Prediction(e) => e.into(),
            SubmissionError::Persistence(e) => e.into(),
        }
    }
}
