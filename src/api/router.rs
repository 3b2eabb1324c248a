//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.
//!
//! Middleware stack for record routes (outermost → innermost):
//! 1. Auth (user id) → 2. Access log
//! Request tracing and CORS wrap the whole router.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the API router.
pub fn api_router(core: Arc<CoreState>) -> Router {
    let ctx = ApiContext::new(core);

    // Layers are applied from bottom (innermost) to top (outermost).
    let protected = Router::new()
        .route("/health/submit", post(endpoints::records::submit))
        .route("/health/records", get(endpoints::records::list))
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(axum::middleware::from_fn(middleware::auth::require_user));

    let unprotected = Router::new()
        .route("/status", get(endpoints::status::check))
        .with_state(ctx);

    Router::new()
        .nest("/api", protected.merge(unprotected))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
