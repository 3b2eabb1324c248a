use std::time::Duration;

use chrono::Utc;
use serde_json::Value;

use super::types::{extract_predictions, normalize_predictions, PredictRequest, ServiceStatus};
use super::PredictionError;
use crate::config::InferenceConfig;
use crate::models::RiskSummary;
use crate::pipeline::encoder::FeatureVector;

/// HTTP client for the inference service.
///
/// Every call is bounded by the configured timeout; an abandoned call
/// leaves nothing behind on this side.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl PredictionClient {
    pub fn new(config: &InferenceConfig) -> Result<Self, PredictionError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PredictionError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Score a feature vector and normalize the per-disease results.
    pub async fn predict(&self, features: &FeatureVector) -> Result<RiskSummary, PredictionError> {
        let url = format!("{}/predict", self.base_url);
        tracing::debug!(url = %url, "Sending features to inference service");

        let response = self
            .client
            .post(&url)
            .json(&PredictRequest { features })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let body = self.success_body(response).await?;
        let predictions = extract_predictions(&body)?;
        let summary = normalize_predictions(predictions, Utc::now());

        tracing::info!(
            received = predictions.len(),
            kept = summary.len(),
            "Inference predictions normalized"
        );
        Ok(summary)
    }

    /// Query the service index route for liveness and loaded models.
    pub async fn health(&self) -> Result<ServiceStatus, PredictionError> {
        let url = format!("{}/", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let body = self.success_body(response).await?;
        serde_json::from_value(body).map_err(|e| PredictionError::Malformed(e.to_string()))
    }

    async fn success_body(&self, response: reqwest::Response) -> Result<Value, PredictionError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %body, "Inference service returned error");
            return Err(PredictionError::Response {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
        serde_json::from_slice(&bytes).map_err(|e| PredictionError::Malformed(e.to_string()))
    }

    fn transport_error(&self, e: reqwest::Error) -> PredictionError {
        if e.is_timeout() {
            tracing::warn!(timeout_ms = self.timeout.as_millis() as u64, "Inference request timed out");
            PredictionError::Timeout(self.timeout)
        } else {
            tracing::warn!(url = %self.base_url, error = %e, "Inference service unreachable");
            PredictionError::Unavailable {
                url: self.base_url.clone(),
                reason: e.to_string(),
            }
        }
    }
}
