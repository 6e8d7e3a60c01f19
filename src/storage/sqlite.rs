// src/storage/sqlite.rs
//! Implements KvStore for SQLite. Run `run_migrations` at startup to
//! guarantee schema compatibility.

use crate::storage::traits::KvStore;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Executor, Row, SqlitePool};

const CREATE_DIARY_SETTINGS: &str = r#"
CREATE TABLE IF NOT EXISTS diary_settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Ensure the settings table exists.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    pool.execute(CREATE_DIARY_SETTINGS).await?;
    Ok(())
}

pub struct SqliteKvStore {
    pool: SqlitePool,
}

impl SqliteKvStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KvStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM diary_settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get("value")))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO diary_settings (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM diary_settings WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
