//! Process-wide state shared by every request.
//!
//! Holds no per-submission data: each request opens its own database
//! connection and makes its own inference call, so concurrent submissions
//! never contend on anything here.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rusqlite::Connection;
use thiserror::Error;

use crate::config::AppConfig;
use crate::db::{self, DatabaseError};
use crate::pipeline::prediction::{PredictionClient, PredictionError};

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
    #[error("Prediction client error: {0}")]
    Prediction(#[from] PredictionError),
}

pub struct CoreState {
    db_path: PathBuf,
    predictor: PredictionClient,
}

impl CoreState {
    /// Build state from configuration and make sure the schema is current.
    pub fn new(config: &AppConfig) -> Result<Self, CoreError> {
        let predictor = PredictionClient::new(&config.inference)?;
        Self::with_predictor(&config.database_path, predictor)
    }

    pub fn with_predictor(db_path: &Path, predictor: PredictionClient) -> Result<Self, CoreError> {
        drop(db::open_database(db_path)?);
        tracing::info!(
            db = %db_path.display(),
            inference = predictor.base_url(),
            "Core state ready"
        );
        Ok(Self {
            db_path: db_path.to_path_buf(),
            predictor,
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn predictor(&self) -> &PredictionClient {
        &self.predictor
    }

    /// Open a fresh connection to the record database.
    pub fn open_db(&self) -> Result<Connection, DatabaseError> {
        db::open_database(&self.db_path)
    }

    /// Run blocking database work off the async runtime.
    pub async fn with_db<T, F>(self: &Arc<Self>, work: F) -> Result<T, DatabaseError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, DatabaseError> + Send + 'static,
    {
        let core = Arc::clone(self);
        tokio::task::spawn_blocking(move || {
            let conn = core.open_db()?;
            work(&conn)
        })
        .await
        .map_err(|e| DatabaseError::BackgroundTask(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InferenceConfig;
    use std::time::Duration;

    #[test]
    fn new_creates_database() {
        let tmp = tempfile::tempdir().unwrap();
        let config = AppConfig {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            database_path: tmp.path().join("data").join("records.db"),
            inference: InferenceConfig::new("http://127.0.0.1:5000", Duration::from_secs(5)),
        };
        let core = CoreState::new(&config).unwrap();
        assert!(core.db_path().exists());
        assert_eq!(core.predictor().base_url(), "http://127.0.0.1:5000");
    }

    #[tokio::test]
    async fn with_db_runs_on_fresh_connection() {
        let tmp = tempfile::tempdir().unwrap();
        let predictor = PredictionClient::new(&InferenceConfig::default()).unwrap();
        let core = Arc::new(
            CoreState::with_predictor(&tmp.path().join("records.db"), predictor).unwrap(),
        );

        let tables = core.with_db(|conn| db::count_tables(conn)).await.unwrap();
        assert_eq!(tables, 2);
    }
}
