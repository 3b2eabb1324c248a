//! HTTP surface for the health-risk pipeline.
//!
//! Routes are nested under `/api/`. Record routes require the user id
//! set by the upstream authentication gateway: Auth → Audit → Handler.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_api_server_on, ApiServer, ApiSession};
pub use types::ApiContext;
