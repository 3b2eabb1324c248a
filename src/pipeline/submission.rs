//! One submission as a single unit of work:
//! validate → encode → predict → assemble → persist.
//!
//! Any failure before the insert leaves the store untouched.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use super::assembler;
use super::encoder::{self, ValidationError};
use super::prediction::PredictionError;
use crate::core_state::CoreState;
use crate::db::{self, DatabaseError};
use crate::models::{RawHealthInput, RiskSummary, StoredHealthRecord};

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Prediction(#[from] PredictionError),

    #[error(transparent)]
    Persistence(#[from] DatabaseError),
}

/// What a successful submission produced.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    pub prediction: RiskSummary,
    pub record: StoredHealthRecord,
}

/// Score and store one set of health inputs for `user_id`.
pub async fn submit_health_data(
    core: &Arc<CoreState>,
    user_id: &str,
    raw: &RawHealthInput,
) -> Result<SubmissionOutcome, SubmissionError> {
    let input = encoder::validate(raw)?;
    let features = encoder::encode_validated(&input)?;

    let prediction = core.predictor().predict(&features).await?;
    let record = assembler::assemble(user_id, &input, &prediction);

    let stored = core
        .with_db(move |conn| db::insert_health_record(conn, &record))
        .await?;

    tracing::info!(
        record_id = %stored.id,
        user_id = %stored.user_id,
        diseases = prediction.len(),
        "Health record stored"
    );

    Ok(SubmissionOutcome {
        prediction,
        record: stored,
    })
}

/// Every stored record for `user_id`, newest first.
pub async fn list_health_records(
    core: &Arc<CoreState>,
    user_id: &str,
) -> Result<Vec<StoredHealthRecord>, DatabaseError> {
    let user_id = user_id.to_string();
    core.with_db(move |conn| db::list_health_records_for_user(conn, &user_id))
        .await
}
