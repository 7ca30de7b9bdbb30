//! # Database Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  sqlx::Error / serde_json::Error                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BackendError (fotogear-store) ← What the store understands            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  "Could not add equipment" notification                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use fotogear_store::BackendError;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created
    /// - File permissions issue
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// A write would push local storage past its configured quota.
    #[error("Storage quota exceeded: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded { needed: usize, quota: usize },

    /// The stored blob is not a valid equipment array.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → DbError::QueryFailed
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),
            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

impl From<serde_json::Error> for DbError {
    fn from(err: serde_json::Error) -> Self {
        DbError::Serialization(err.to_string())
    }
}

impl From<DbError> for BackendError {
    fn from(err: DbError) -> Self {
        let message = err.to_string();
        match err {
            DbError::QuotaExceeded { .. } => BackendError::QuotaExceeded(message),
            DbError::Serialization(_) => BackendError::Corrupt(message),
            DbError::ConnectionFailed(_) | DbError::MigrationFailed(_) | DbError::PoolExhausted => {
                BackendError::Unavailable(message)
            }
            DbError::QueryFailed(_) | DbError::Internal(_) => BackendError::RequestFailed(message),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_maps_to_backend_quota() {
        let err: BackendError = DbError::QuotaExceeded {
            needed: 12,
            quota: 10,
        }
        .into();
        assert!(matches!(err, BackendError::QuotaExceeded(msg) if msg.contains("quota is 10")));
    }

    #[test]
    fn test_bad_json_maps_to_corrupt() {
        let parse_err = serde_json::from_str::<Vec<u8>>("{not json").unwrap_err();
        let err: BackendError = DbError::from(parse_err).into();
        assert!(matches!(err, BackendError::Corrupt(_)));
    }

    #[test]
    fn test_closed_pool_is_unavailable() {
        let err: BackendError = DbError::from(sqlx::Error::PoolClosed).into();
        assert!(matches!(err, BackendError::Unavailable(_)));
    }
}
