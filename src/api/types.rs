//! Shared types for the API layer.

use std::sync::Arc;

use crate::core_state::CoreState;

/// Header the upstream authentication gateway sets to the verified user id.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }
}

/// Authenticated user, injected into request extensions by the auth
/// middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: String,
}
