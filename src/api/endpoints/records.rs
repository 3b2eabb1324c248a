//! Health record endpoints.
//!
//! `POST /api/health/submit`: score and store one set of health inputs.
//! `GET /api/health/records`: the caller's records, newest first.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, UserContext};
use crate::models::{RawHealthInput, RiskSummary, StoredHealthRecord};
use crate::pipeline;

#[derive(Serialize)]
pub struct SubmitResponse {
    pub message: &'static str,
    pub prediction: RiskSummary,
    pub record: StoredHealthRecord,
}

#[derive(Serialize)]
pub struct RecordsResponse {
    pub records: Vec<StoredHealthRecord>,
}

/// `POST /api/health/submit`
pub async fn submit(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<UserContext>,
    payload: Result<Json<RawHealthInput>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let Json(raw) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let outcome = pipeline::submit_health_data(&ctx.core, &user.user_id, &raw)
        .await
        .map_err(|e| {
            tracing::warn!(user_id = %user.user_id, error = %e, "Health submission failed");
            ApiError::from(e)
        })?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            message: "Health record submitted successfully",
            prediction: outcome.prediction,
            record: outcome.record,
        }),
    ))
}

/// `GET /api/health/records`
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<RecordsResponse>, ApiError> {
    let records = pipeline::list_health_records(&ctx.core, &user.user_id).await?;
    Ok(Json(RecordsResponse { records }))
}
