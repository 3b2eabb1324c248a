//! Authenticated-user middleware.
//!
//! Authentication itself happens upstream; the gateway forwards the
//! verified user id in `X-User-Id`. This layer rejects requests that
//! arrive without one and injects `UserContext` for handlers.

use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::types::{UserContext, USER_ID_HEADER};

/// Require an authenticated user id on the request.
pub async fn require_user(
    req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    match require_user_inner(req, next).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

async fn require_user_inner(
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let user_id = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::Unauthorized)?
        .to_string();

    req.extensions_mut().insert(UserContext { user_id });

    Ok(next.run(req).await)
}
