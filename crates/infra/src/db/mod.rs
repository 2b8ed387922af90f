//! SQLite connection pool and schema bootstrap.
//!
//! The schema is created with `IF NOT EXISTS` statements on every start, so
//! connecting to an existing database file is a no-op for the schema.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::config::DbConfig;

/// Open a pool for the configured database and ensure the schema exists.
pub async fn connect(config: &DbConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    ensure_schema(&pool).await?;
    tracing::info!(url = %config.url, "database ready");
    Ok(pool)
}

/// Fresh in-memory database with the full schema.
///
/// Pinned to a single connection that never expires: every connection to
/// `:memory:` is its own database.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    ensure_schema(&pool).await?;
    Ok(pool)
}

/// Create the `producers` and `cheeses` tables if they are missing.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS producers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            founding_year INTEGER NOT NULL,
            operation_size TEXT NOT NULL,
            region TEXT NOT NULL,
            image TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cheeses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            producer_id INTEGER NOT NULL REFERENCES producers(id) ON DELETE CASCADE,
            production_date TEXT NOT NULL,
            price REAL NOT NULL,
            is_raw_milk INTEGER NOT NULL,
            kind TEXT NOT NULL,
            image TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_cheeses_producer_id ON cheeses(producer_id)")
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    #[tokio::test]
    async fn schema_bootstrap_is_idempotent() {
        let pool = connect_in_memory().await.unwrap();
        ensure_schema(&pool).await.unwrap();

        let row = sqlx::query(
            "SELECT COUNT(*) AS n FROM sqlite_master WHERE type = 'table' AND name IN ('producers', 'cheeses')",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(row.get::<i64, _>("n"), 2);
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let pool = connect_in_memory().await.unwrap();
        let res = sqlx::query(
            "INSERT INTO cheeses (producer_id, production_date, price, is_raw_milk, kind, image) \
             VALUES (999, '2024-01-01', 10.0, 0, 'Brie', 'x')",
        )
        .execute(&pool)
        .await;
        assert!(res.is_err());
    }
}
