use anyhow::Context;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use crate::config::DatabaseConfig;
use crate::error::AppError;
use crate::models::item::{Item, NewItem};

/// DDL for the `items` table
///
/// `IF NOT EXISTS` keeps schema creation idempotent so the readiness gate can
/// run it on every attempt.
const CREATE_ITEMS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS items (
    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    description TEXT NULL,
    price DECIMAL(10, 2) NULL,
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

/// Create the database connection pool
///
/// Connects lazily: waiting for the database to come up is the readiness
/// gate's job, not the pool's.
pub fn connect_pool(cfg: &DatabaseConfig) -> anyhow::Result<MySqlPool> {
    MySqlPoolOptions::new()
        .max_connections(10)
        .connect_lazy(&cfg.url())
        .context("Failed to create database pool")
}

/// Ensure the `items` table exists. Safe to invoke repeatedly.
pub async fn ensure_schema(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_ITEMS_TABLE).execute(pool).await?;
    Ok(())
}

/// Insert a new item and return the created row
///
/// Runs inside a transaction so a failed creation never leaves a partial row.
pub async fn insert_item(pool: &MySqlPool, new_item: &NewItem) -> Result<Item, AppError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("INSERT INTO items (name, description, price) VALUES (?, ?, ?)")
        .bind(&new_item.name)
        .bind(&new_item.description)
        .bind(new_item.price)
        .execute(&mut *tx)
        .await?;

    let item = sqlx::query_as::<_, Item>(
        "SELECT id, name, description, price, created_at FROM items WHERE id = ?",
    )
    .bind(result.last_insert_id())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(item)
}

/// Whether a database error means the backend is not reachable yet
///
/// Only this class is retried by the readiness gate. Everything else (bad
/// credentials, malformed SQL, constraint violations) propagates.
pub fn is_unreachable(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::Tls(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;

    #[test]
    fn test_is_unreachable_connectivity_errors() {
        let io = sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));
        assert!(is_unreachable(&io));
        assert!(is_unreachable(&sqlx::Error::PoolTimedOut));
    }

    #[test]
    fn test_is_unreachable_other_errors() {
        assert!(!is_unreachable(&sqlx::Error::RowNotFound));
        assert!(!is_unreachable(&sqlx::Error::PoolClosed));
    }

    #[tokio::test]
    async fn test_connect_pool_is_lazy() {
        // No MySQL server behind this config; lazy connect must still succeed
        let cfg = DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            ..DatabaseConfig::default()
        };
        assert!(connect_pool(&cfg).is_ok());
    }

    #[test]
    fn test_schema_is_idempotent_ddl() {
        assert!(CREATE_ITEMS_TABLE.contains("IF NOT EXISTS"));
    }
}
