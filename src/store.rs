//! Storage handle: the process-wide PostgreSQL pool, per-request sessions, schema DDL and the bootstrap loader.

use crate::campaign::{CampaignRecord, COLUMNS, TABLE};
use crate::config::Settings;
use crate::error::{AppError, StartupError};
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};
use std::time::Duration;

const CAMPAIGNS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS campaigns (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        status TEXT NOT NULL,
        clicks INTEGER NOT NULL,
        cost DOUBLE PRECISION NOT NULL,
        impressions INTEGER NOT NULL
    )
"#;

/// Owns the connection pool. Cheap to clone; clones share the pool.
#[derive(Clone)]
pub struct Store {
    pool: PgPool,
}

impl Store {
    /// Build the pool and open its first connection so an unreachable database fails startup.
    pub async fn connect(settings: &Settings) -> Result<Self, StartupError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(&settings.database_url)
            .await
            .map_err(StartupError::Connect)?;
        Ok(Self { pool })
    }

    /// Build the pool without connecting. The first session acquire opens the first connection
    /// and fails with [`AppError::Connection`] once `acquire_timeout` elapses.
    pub fn connect_lazy(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, StartupError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect_lazy(database_url)
            .map_err(StartupError::Connect)?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Acquire a session for one unit of work. Not retried beyond the pool's own acquire timeout.
    pub async fn open_session(&self) -> Result<Session, AppError> {
        let conn = self.pool.acquire().await.map_err(AppError::Connection)?;
        tracing::debug!("session opened");
        Ok(Session { conn })
    }

    /// Create the campaigns table if absent. Safe to call repeatedly; existing tables are left as they are.
    pub async fn ensure_schema(&self) -> Result<(), StartupError> {
        sqlx::query(CAMPAIGNS_DDL)
            .execute(&self.pool)
            .await
            .map_err(StartupError::Schema)?;
        tracing::info!(table = TABLE, "schema ready");
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Connection)?;
        Ok(())
    }

    /// Run a bootstrap SQL script in one transaction. Returns the number of statements executed.
    pub async fn run_script(&self, script: &str) -> Result<usize, StartupError> {
        let statements = split_statements(script);
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StartupError::Bootstrap(e.to_string()))?;
        for (i, stmt) in statements.iter().enumerate() {
            tracing::debug!(statement = i + 1, "executing bootstrap statement");
            sqlx::query(stmt)
                .execute(&mut *tx)
                .await
                .map_err(|e| StartupError::Bootstrap(format!("statement {}: {}", i + 1, e)))?;
        }
        tx.commit()
            .await
            .map_err(|e| StartupError::Bootstrap(e.to_string()))?;
        Ok(statements.len())
    }

    /// Stop handing out sessions and close idle connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// One pooled connection. Dropping the session, on any path, drops the `PoolConnection`
/// and that returns the connection to the pool; `close` does the same and logs it.
pub struct Session {
    conn: PoolConnection<Postgres>,
}

impl Session {
    /// Read every campaign row in the storage engine's natural order.
    pub async fn fetch_campaigns(&mut self) -> Result<Vec<CampaignRecord>, AppError> {
        let sql = format!("SELECT {} FROM {}", COLUMNS.join(", "), TABLE);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query(&sql).fetch_all(&mut *self.conn).await?;
        rows.iter().map(CampaignRecord::from_row).collect()
    }

    pub fn close(self) {
        let Session { conn } = self;
        drop(conn);
        tracing::debug!("session released");
    }
}

/// Split a script on `;`. Chunks that hold only whitespace or `--` comments are skipped.
/// Semicolons inside string literals are not supported.
pub fn split_statements(script: &str) -> Vec<&str> {
    script
        .split(';')
        .map(str::trim)
        .filter(|chunk| {
            chunk
                .lines()
                .map(str::trim)
                .any(|line| !line.is_empty() && !line.starts_with("--"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_semicolons_and_drops_blank_chunks() {
        let script = "DELETE FROM campaigns;\n\nINSERT INTO campaigns VALUES (1);\n  ;\n";
        assert_eq!(
            split_statements(script),
            vec!["DELETE FROM campaigns", "INSERT INTO campaigns VALUES (1)"]
        );
    }

    #[test]
    fn comment_only_chunks_are_skipped() {
        let script = "-- sample data\n;\n-- header\nSELECT 1;\n-- trailing";
        assert_eq!(split_statements(script), vec!["-- header\nSELECT 1"]);
    }

    #[tokio::test]
    async fn lazy_store_rejects_malformed_url() {
        let err = Store::connect_lazy("not a url", 1, Duration::from_millis(100)).err();
        assert!(matches!(err, Some(StartupError::Connect(_))));
    }

    #[tokio::test]
    async fn lazy_store_fails_session_when_unreachable() {
        let store = Store::connect_lazy(
            "postgres://campaigns@127.0.0.1:1/campaigns",
            1,
            Duration::from_millis(300),
        )
        .unwrap();
        let err = store.open_session().await.err();
        assert!(matches!(err, Some(AppError::Connection(_))));
    }

    #[test]
    fn empty_script_has_no_statements() {
        assert!(split_statements("").is_empty());
        assert!(split_statements(" ;\n; ").is_empty());
    }
}
