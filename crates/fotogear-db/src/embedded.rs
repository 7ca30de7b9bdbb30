//! # Embedded Backend
//!
//! The whole collection as one JSON array under a single local-storage key.
//!
//! ## Blob Layout
//! ```text
//! local_storage
//! ┌──────────────────────────┬──────────────────────────────────────────────┐
//! │ key                      │ value                                        │
//! ├──────────────────────────┼──────────────────────────────────────────────┤
//! │ foto-gear-equipment      │ [{"id":"…","name":"Canon EOS R5",            │
//! │                          │   "imageUrl":"data:image/jpeg;base64,…",    │
//! │                          │   "isPacked":false,"createdAt":1717…}, …]   │
//! └──────────────────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! Every mutation reads the blob, changes it, and rewrites all of it. An
//! absent key reads as an empty collection.

use async_trait::async_trait;
use tracing::debug;

use fotogear_core::{Equipment, ImageUpload};
use fotogear_store::{BackendKind, BackendResult, EquipmentBackend};

use crate::error::DbResult;
use crate::pool::Database;
use crate::repository::local_storage::LocalStorageRepository;

/// Local-storage key holding the equipment blob.
pub const EMBEDDED_STORAGE_KEY: &str = "foto-gear-equipment";

/// [`EquipmentBackend`] over the local_storage slot.
#[derive(Debug, Clone)]
pub struct EmbeddedBackend {
    storage: LocalStorageRepository,
}

impl EmbeddedBackend {
    pub fn new(db: &Database) -> Self {
        EmbeddedBackend {
            storage: db.local_storage(),
        }
    }

    async fn read(&self) -> DbResult<Vec<Equipment>> {
        match self.storage.get_item(EMBEDDED_STORAGE_KEY).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    async fn write(&self, items: &[Equipment]) -> DbResult<()> {
        let json = serde_json::to_string(items)?;
        debug!(key = EMBEDDED_STORAGE_KEY, count = items.len(), "Rewriting equipment blob");
        self.storage.set_item(EMBEDDED_STORAGE_KEY, &json).await
    }
}

#[async_trait]
impl EquipmentBackend for EmbeddedBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Embedded
    }

    async fn load_all(&self) -> BackendResult<Vec<Equipment>> {
        Ok(self.read().await?)
    }

    async fn insert(&self, item: &Equipment) -> BackendResult<()> {
        let mut items = self.read().await?;
        items.push(item.clone());
        Ok(self.write(&items).await?)
    }

    async fn set_packed(&self, id: &str, is_packed: bool) -> BackendResult<()> {
        let mut items = self.read().await?;
        let Some(item) = items.iter_mut().find(|e| e.id == id) else {
            return Ok(());
        };
        item.is_packed = is_packed;
        Ok(self.write(&items).await?)
    }

    async fn delete(&self, id: &str) -> BackendResult<()> {
        let mut items = self.read().await?;
        let before = items.len();
        items.retain(|e| e.id != id);
        if items.len() == before {
            return Ok(());
        }
        Ok(self.write(&items).await?)
    }

    async fn store_image(&self, upload: &ImageUpload) -> BackendResult<String> {
        Ok(upload.to_data_uri())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
