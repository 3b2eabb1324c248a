use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::PredictionError;
use crate::models::{RiskSummary, RiskSummaryEntry, PROBABILITY_UNAVAILABLE};
use crate::pipeline::encoder::FeatureVector;

/// Request body for `POST /predict`
#[derive(Serialize)]
pub(crate) struct PredictRequest<'a> {
    pub features: &'a FeatureVector,
}

/// One label's entry in the `predictions` mapping.
#[derive(Debug, Deserialize)]
struct RawPrediction {
    #[serde(default)]
    risk_score: Option<ScoreValue>,
    #[serde(default)]
    probability: Option<Value>,
    #[serde(default)]
    features_used: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScoreValue {
    Number(f64),
    Text(String),
}

impl ScoreValue {
    fn to_f64(&self) -> Option<f64> {
        let value = match self {
            ScoreValue::Number(n) => *n,
            ScoreValue::Text(t) => t.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// Response body from the service index route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default, alias = "available_models")]
    pub available_models: Vec<String>,
}

/// Pull the `predictions` object out of a response body.
pub(crate) fn extract_predictions(body: &Value) -> Result<&Map<String, Value>, PredictionError> {
    body.get("predictions")
        .and_then(Value::as_object)
        .ok_or_else(|| PredictionError::Malformed("missing 'predictions' object".into()))
}

/// Normalize the per-label entries into a [`RiskSummary`].
///
/// Labels carrying an error marker, or whose entry cannot be read, are
/// dropped; the rest are kept under the label the service used.
pub fn normalize_predictions(
    predictions: &Map<String, Value>,
    now: DateTime<Utc>,
) -> RiskSummary {
    let mut summary = RiskSummary::new();

    for (label, entry) in predictions {
        let raw: RawPrediction = match serde_json::from_value(entry.clone()) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(label = %label, error = %e, "Skipping unreadable prediction");
                continue;
            }
        };

        if let Some(marker) = raw.error.as_ref().filter(|m| is_error_marker(m)) {
            tracing::warn!(label = %label, error = %marker, "Skipping failed prediction");
            continue;
        }

        let Some(risk_score) = raw.risk_score.as_ref().and_then(ScoreValue::to_f64) else {
            tracing::warn!(label = %label, "Skipping prediction without a numeric risk_score");
            continue;
        };

        summary.insert(
            label.clone(),
            RiskSummaryEntry {
                risk_score,
                probability: format_probability(raw.probability.as_ref()),
                last_updated: now,
                features_used: feature_names(raw.features_used.as_ref()),
            },
        );
    }

    summary
}

/// Positive-class probability as a two-decimal percentage.
///
/// Reads the second element of the class-probability array; anything else
/// (absent, not an array, too short, non-numeric) gives `"N/A"`.
pub fn format_probability(probability: Option<&Value>) -> String {
    match probability
        .and_then(Value::as_array)
        .and_then(|p| p.get(1))
        .and_then(Value::as_f64)
    {
        Some(p) if p.is_finite() => format!("{:.2}%", p * 100.0),
        _ => PROBABILITY_UNAVAILABLE.to_string(),
    }
}

/// String elements of `features_used`; other elements are skipped.
fn feature_names(features: Option<&Value>) -> Vec<String> {
    features
        .and_then(Value::as_array)
        .map(|names| {
            names
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Falsy markers (`null`, `false`, `0`, `""`) mean the model succeeded.
fn is_error_marker(marker: &Value) -> bool {
    match marker {
        Value::Null | Value::Bool(false) => false,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}
