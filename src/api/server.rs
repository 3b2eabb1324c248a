//! HTTP server lifecycle.
//!
//! bind → spawn background task → return handle with shutdown channel.

use std::net::SocketAddr;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::api::router::api_router;
use crate::core_state::CoreState;

/// Metadata for a running server.
#[derive(Debug, Clone, Serialize)]
pub struct ApiSession {
    pub session_id: String,
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

/// Handle to a running API server.
pub struct ApiServer {
    pub session: ApiSession,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl ApiServer {
    /// Signal graceful shutdown. In-flight requests are allowed to finish.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("API server shutdown signal sent");
        }
    }

    /// Wait for the server task to exit.
    pub async fn stopped(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!("API server task failed: {e}");
            }
        }
    }
}

/// Bind `addr` and serve the API in a background task.
///
/// Port 0 picks an ephemeral port; the bound address is in the session.
pub async fn start_api_server_on(
    core: Arc<CoreState>,
    addr: SocketAddr,
) -> Result<ApiServer, std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;

    let app = api_router(core);

    let session = ApiSession {
        session_id: Uuid::new_v4().to_string(),
        server_addr: addr.to_string(),
        port: addr.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("API server received shutdown signal");
        };

        tracing::info!(%addr, "API server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("API server error: {e}");
        }

        tracing::info!("API server stopped");
    });

    Ok(ApiServer {
        session,
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InferenceConfig;
    use crate::pipeline::prediction::{fake, PredictionClient};
    use axum::http::StatusCode;
    use std::time::Duration;

    async fn start() -> (ApiServer, tempfile::TempDir) {
        let base = fake::spawn(fake::predict_route(StatusCode::OK, fake::sample_response())).await;
        let tmp = tempfile::tempdir().unwrap();
        let predictor =
            PredictionClient::new(&InferenceConfig::new(&base, Duration::from_secs(5))).unwrap();
        let core = CoreState::with_predictor(&tmp.path().join("records.db"), predictor).unwrap();
        let server = start_api_server_on(Arc::new(core), "127.0.0.1:0".parse().unwrap())
            .await
            .expect("server should start");
        (server, tmp)
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let (mut server, _tmp) = start().await;
        assert!(server.session.port > 0);
        assert!(!server.session.session_id.is_empty());

        let url = format!("http://127.0.0.1:{}/api/health/records", server.session.port);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status().as_u16(), 401);

        server.shutdown();
        tokio::time::timeout(Duration::from_secs(5), server.stopped())
            .await
            .expect("server should stop");
    }

    #[tokio::test]
    async fn submit_over_the_wire() {
        let (mut server, _tmp) = start().await;
        let base = format!("http://{}", server.session.server_addr);
        let client = reqwest::Client::new();

        let resp = client
            .post(format!("{base}/api/health/submit"))
            .header("X-User-Id", "wire-user")
            .json(&serde_json::json!({
                "age": 35,
                "sex": "Female",
                "bmi": 22.5,
                "smoking": false,
                "diabetesFamilyHistory": false,
                "bloodPressureSystolic": 118,
                "bloodPressureDiastolic": 76,
                "bloodSugar": 90,
                "cholesterol": 180,
                "environmentalExposure": "low",
                "coughingFrequency": "rare"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 201);

        let records: serde_json::Value = client
            .get(format!("{base}/api/health/records"))
            .header("X-User-Id", "wire-user")
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(records["records"].as_array().unwrap().len(), 1);

        server.shutdown();
        server.stopped().await;
    }

    #[tokio::test]
    async fn session_has_valid_metadata() {
        let (mut server, _tmp) = start().await;
        assert!(!server.session.started_at.is_empty());
        assert!(server.session.server_addr.starts_with("127.0.0.1:"));
        server.shutdown();
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let (mut server, _tmp) = start().await;
        server.shutdown();
        server.shutdown();
        server.stopped().await;
        server.stopped().await;
    }
}
