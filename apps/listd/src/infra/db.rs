use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{sanitize_db_url, Config, DbKind};
use crate::error::AppError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

fn connect_options(config: &Config) -> ConnectOptions {
    let mut opts = ConnectOptions::new(config.database_url());
    opts.connect_timeout(CONNECT_TIMEOUT)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .sqlx_logging(false);

    // Every SQLite memory connection is a separate database, so the pool
    // must hand out the same single connection for its whole lifetime.
    if config.db_kind == DbKind::SqliteMemory {
        opts.max_connections(1).min_connections(1);
    }
    opts
}

/// Open a pooled connection for `config`.
/// This function does NOT run any migrations.
pub async fn connect_db(config: &Config) -> Result<DatabaseConnection, AppError> {
    let url = config.database_url();
    let conn = Database::connect(connect_options(config))
        .await
        .map_err(|e| {
            warn!(
                db_kind = %config.db_kind,
                url = %sanitize_db_url(&url),
                error = %e,
                "database connection failed"
            );
            AppError::db_unavailable(format!("Could not connect to {} database", config.db_kind))
        })?;

    info!(db_kind = %config.db_kind, url = %sanitize_db_url(&url), "database connected");
    Ok(conn)
}

/// Apply pending migrations on an open connection.
pub async fn apply_migrations(conn: &DatabaseConnection) -> Result<(), AppError> {
    migrate(conn, MigrationCommand::Up).await.map_err(|e| {
        warn!(error = %e, "schema migration failed");
        AppError::db("Schema migration failed")
    })
}

/// Connect, then bring the schema up to date.
pub async fn bootstrap_db(config: &Config) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(config).await?;
    apply_migrations(&conn).await?;
    Ok(conn)
}
