//! # Local Storage Repository
//!
//! A string key/value slot with the shape of browser local storage.
//!
//! ## Quota Accounting
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  set_item("k", value)                                                   │
//! │                                                                         │
//! │  used = Σ bytes(key) + bytes(value)   over every OTHER key              │
//! │  needed = used + bytes("k") + bytes(value)                              │
//! │                                                                         │
//! │  needed > quota ──► DbError::QuotaExceeded  (nothing written)           │
//! │  otherwise      ──► upsert, updated_at = now                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};

/// Repository for the `local_storage` table.
#[derive(Debug, Clone)]
pub struct LocalStorageRepository {
    pool: SqlitePool,
    quota_bytes: Option<usize>,
}

impl LocalStorageRepository {
    pub fn new(pool: SqlitePool, quota_bytes: Option<usize>) -> Self {
        LocalStorageRepository { pool, quota_bytes }
    }

    /// Returns the value under `key`, or `None` if nothing was ever stored.
    pub async fn get_item(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM local_storage WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub async fn set_item(&self, key: &str, value: &str) -> DbResult<()> {
        if let Some(quota) = self.quota_bytes {
            let needed = self.bytes_used_excluding(key).await? + key.len() + value.len();
            if needed > quota {
                warn!(key = %key, needed, quota, "Local storage quota exceeded");
                return Err(DbError::QuotaExceeded { needed, quota });
            }
        }

        debug!(key = %key, bytes = value.len(), "Writing local storage item");

        sqlx::query(
            r#"
            INSERT INTO local_storage (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Removes `key`. Removing an absent key is not an error.
    pub async fn remove_item(&self, key: &str) -> DbResult<()> {
        debug!(key = %key, "Removing local storage item");

        sqlx::query("DELETE FROM local_storage WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Total bytes held, keys included.
    pub async fn bytes_used(&self) -> DbResult<usize> {
        self.bytes_used_excluding("").await
    }

    async fn bytes_used_excluding(&self, key: &str) -> DbResult<usize> {
        let used: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))), 0)
            FROM local_storage
            WHERE key <> ?1
            "#,
        )
        .bind(key)
        .fetch_one(&self.pool)
        .await?;

        Ok(used.max(0) as usize)
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert_eq!(db.local_storage().get_item("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_replaces_value() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let storage = db.local_storage();

        storage.set_item("k", "one").await.unwrap();
        storage.set_item("k", "two").await.unwrap();

        assert_eq!(storage.get_item("k").await.unwrap().as_deref(), Some("two"));
        assert_eq!(storage.bytes_used().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_remove_item() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let storage = db.local_storage();

        storage.set_item("k", "v").await.unwrap();
        storage.remove_item("k").await.unwrap();
        storage.remove_item("k").await.unwrap();

        assert_eq!(storage.get_item("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_quota_counts_other_keys_and_rejects_overflow() {
        let db = Database::new(DbConfig::in_memory().quota_bytes(10))
            .await
            .unwrap();
        let storage = db.local_storage();

        storage.set_item("a", "1234").await.unwrap();
        // Overwriting "a" does not double count its old value.
        storage.set_item("a", "12345").await.unwrap();

        let err = storage.set_item("b", "12345").await.unwrap_err();
        assert!(matches!(
            err,
            crate::DbError::QuotaExceeded { needed: 12, quota: 10 }
        ));
        assert_eq!(storage.get_item("b").await.unwrap(), None);
    }
}
