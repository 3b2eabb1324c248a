use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::DiseaseSlot;

/// Placeholder when the inference service reports no probability.
pub const PROBABILITY_UNAVAILABLE: &str = "N/A";

/// Normalized risk for one disease label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSummaryEntry {
    pub risk_score: f64,
    /// Percentage with two decimals (`"42.00%"`) or `"N/A"`.
    pub probability: String,
    pub last_updated: DateTime<Utc>,
    pub features_used: Vec<String>,
}

/// Disease label → entry, for whatever labels the inference service returned.
pub type RiskSummary = BTreeMap<String, RiskSummaryEntry>;

/// Risk results attached to a stored record.
///
/// Keyed by the label the inference service used, so labels the four
/// well-known slots do not cover are still kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskAssessment(BTreeMap<String, RiskSummaryEntry>);

impl RiskAssessment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, entry: RiskSummaryEntry) {
        self.0.insert(label.into(), entry);
    }

    /// Exact-label lookup.
    pub fn get(&self, label: &str) -> Option<&RiskSummaryEntry> {
        self.0.get(label)
    }

    /// Entry stored under one of the named slots, if any.
    pub fn slot(&self, slot: DiseaseSlot) -> Option<&RiskSummaryEntry> {
        self.0.get(slot.as_str())
    }

    /// Labels that do not correspond to a named slot.
    pub fn unslotted_labels(&self) -> impl Iterator<Item = &str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|label| !DiseaseSlot::ALL.iter().any(|s| s.as_str() == *label))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<RiskSummary> for RiskAssessment {
    fn from(summary: RiskSummary) -> Self {
        Self(summary)
    }
}
