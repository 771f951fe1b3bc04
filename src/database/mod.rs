pub mod business;
pub mod emails;
pub mod schema;
pub mod traffic;

use anyhow::Result;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Pool, Sqlite,
};
use std::{str::FromStr, time::Duration};
use tracing::info;

pub type DbPool = Pool<Sqlite>;

/// Opens the SQLite pool and ensures the schema exists. The `mode=rwc` URL
/// form creates the database file on first use.
pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    info!("Connecting to SQLite database");

    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));
    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;

    schema::run_migrations(&pool).await?;

    Ok(pool)
}

pub async fn close_pool(pool: DbPool) {
    info!("Closing database connection pool");
    pool.close().await;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Pool backed by a temp-file database; keep the returned dir alive for
    /// the duration of the test.
    pub(crate) async fn test_pool() -> (DbPool, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let url = format!("sqlite:{}?mode=rwc", dir.path().join("test.db").display());
        let pool = create_pool(&url).await.expect("create test pool");
        (pool, dir)
    }
}
