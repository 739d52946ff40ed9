//! # Snapshot Repository
//!
//! Key/value storage for serialized snapshots.
//!
//! ## Snapshot Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  snapshots                                                              │
//! │  key       │ value                                    │ updated_at      │
//! │  ──────────┼──────────────────────────────────────────┼──────────────── │
//! │  products  │ [{"id":1,"name":"Mouse","price":25.0,…}] │ 2026-10-16T…    │
//! │                                                                         │
//! │  put()  → whole value is replaced (no partial updates)                 │
//! │  get()  → None when the key was never written                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for snapshot reads and writes.
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    pool: SqlitePool,
}

impl SnapshotRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SnapshotRepository { pool }
    }

    /// Reads the raw value stored under `key`.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM snapshots WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        debug!(key = %key, found = value.is_some(), "Read snapshot");
        Ok(value)
    }

    /// Writes `value` under `key`, replacing any previous value.
    pub async fn put(&self, key: &str, value: &str) -> DbResult<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO snapshots (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = value.len(), "Wrote snapshot");
        Ok(())
    }

    /// Reads and deserializes the JSON value under `key`.
    ///
    /// ## Returns
    /// * `Ok(None)` - key never written
    /// * `Err(DbError::CorruptSnapshot)` - stored text is not valid for `T`
    pub async fn load_json<T: DeserializeOwned>(&self, key: &str) -> DbResult<Option<T>> {
        match self.get(key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| DbError::corrupt(key, e)),
            None => Ok(None),
        }
    }

    /// Serializes `value` as JSON and stores it under `key`.
    pub async fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> DbResult<()> {
        let raw = serde_json::to_string(value).map_err(|e| DbError::corrupt(key, e))?;
        self.put(key, &raw).await
    }
}
