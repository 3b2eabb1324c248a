use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::health_input::HealthInput;
use super::risk::RiskAssessment;

/// One submission's inputs and risk results, ready to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    pub user_id: String,
    #[serde(flatten)]
    pub input: HealthInput,
    pub risk_assessment: RiskAssessment,
    pub created_at: DateTime<Utc>,
}

/// A record as returned by the store, with its id and write stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredHealthRecord {
    pub id: Uuid,
    pub user_id: String,
    #[serde(flatten)]
    pub input: HealthInput,
    pub risk_assessment: RiskAssessment,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
