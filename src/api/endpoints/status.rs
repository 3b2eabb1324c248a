//! Liveness endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub inference: InferenceStatus,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceStatus {
    pub reachable: bool,
    pub available_models: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `GET /api/status`: liveness of this service and the inference service.
///
/// Always 200; an unreachable inference service is reported in the body.
pub async fn check(State(ctx): State<ApiContext>) -> Json<StatusResponse> {
    let inference = match ctx.core.predictor().health().await {
        Ok(status) => InferenceStatus {
            reachable: true,
            available_models: status.available_models,
            error: None,
        },
        Err(e) => InferenceStatus {
            reachable: false,
            available_models: Vec::new(),
            error: Some(e.to_string()),
        },
    };

    Json(StatusResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        inference,
    })
}
