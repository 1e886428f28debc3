use sea_orm::DatabaseConnection;

use crate::config::db::Config;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;

/// The long-lived application object shared by every handler.
///
/// Owns the pooled database handle; cloning shares the same pool.
#[derive(Debug, Clone)]
pub struct AppState {
    db: DatabaseConnection,
    config: Config,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self { db, config }
    }

    /// Connect (and migrate) using `config`, then wrap the handle.
    pub async fn connect(config: Config) -> Result<Self, AppError> {
        let db = bootstrap_db(&config).await?;
        Ok(Self::new(db, config))
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Close the underlying pool. Clones of this state stop working afterwards.
    pub async fn close(self) -> Result<(), AppError> {
        self.db.close().await.map_err(AppError::from)
    }
}
