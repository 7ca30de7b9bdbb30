//! # Backend Contract
//!
//! The persistence seam behind the store.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    EquipmentBackend                                     │
//! │                                                                         │
//! │  load_all()              → every record the owner has                   │
//! │  insert(&record)         → persist one new record                       │
//! │  set_packed(id, packed)  → write the packed flag of one record          │
//! │  delete(id)              → remove one record                            │
//! │  store_image(&upload)    → persist a photo, return its imageUrl         │
//! │                                                                         │
//! │  Unknown ids in set_packed/delete are NOT errors.                       │
//! │  Both implementations return the same Equipment shape.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The implementation is chosen once, when the store is built. Nothing above
//! this trait ever branches on which one is active.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use fotogear_core::{Equipment, ImageUpload};

// =============================================================================
// Backend Kind
// =============================================================================

/// Which persistence backend a session uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Whole collection as one JSON blob in device-local storage.
    #[default]
    Embedded,
    /// Remote table scoped by owner, images in an object store.
    Remote,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Embedded => write!(f, "embedded"),
            BackendKind::Remote => write!(f, "remote"),
        }
    }
}

/// Backend name that is neither `embedded` nor `remote`.
#[derive(Debug, Error)]
#[error("Unknown backend: '{0}'. Valid options: embedded, remote")]
pub struct UnknownBackendKind(pub String);

impl FromStr for BackendKind {
    type Err = UnknownBackendKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "embedded" | "local" => Ok(BackendKind::Embedded),
            "remote" | "cloud" => Ok(BackendKind::Remote),
            other => Err(UnknownBackendKind(other.to_string())),
        }
    }
}

// =============================================================================
// Backend Error
// =============================================================================

/// Failures reported by a backend.
///
/// Backend crates convert their own error types into this one at the seam.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// No signed-in owner (remote backend only).
    #[error("Authentication required")]
    AuthRequired,

    /// Network failure, closed pool, unreachable service.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Local storage is full.
    #[error("Storage quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The backend refused the request (row-level security, bucket policy).
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Stored data could not be decoded.
    #[error("Stored data is corrupt: {0}")]
    Corrupt(String),

    /// Any other rejected request.
    #[error("Request failed: {0}")]
    RequestFailed(String),
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

// =============================================================================
// Backend Trait
// =============================================================================

/// Persistence for the equipment collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EquipmentBackend: Send + Sync {
    /// Which implementation this is (for logs and diagnostics).
    fn kind(&self) -> BackendKind;

    /// Fetches the complete collection.
    async fn load_all(&self) -> BackendResult<Vec<Equipment>>;

    /// Persists a new record.
    async fn insert(&self, item: &Equipment) -> BackendResult<()>;

    /// Writes the packed flag of one record. Unknown `id` is a no-op.
    async fn set_packed(&self, id: &str, is_packed: bool) -> BackendResult<()>;

    /// Removes one record. Unknown `id` is a no-op.
    async fn delete(&self, id: &str) -> BackendResult<()>;

    /// Persists a photo and returns the value to store as `imageUrl`.
    async fn store_image(&self, upload: &ImageUpload) -> BackendResult<String>;
}
