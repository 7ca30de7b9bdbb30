//! # In-Memory Backend
//!
//! A backend that lives only as long as the process. Used by tests and by
//! shells that want a throwaway session.

use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

use fotogear_core::{Equipment, ImageUpload};

use crate::backend::{BackendError, BackendKind, BackendResult, EquipmentBackend};

/// Keeps records in a `Vec`, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    items: Mutex<Vec<Equipment>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the given records already persisted.
    pub fn with_items(items: Vec<Equipment>) -> Self {
        MemoryBackend {
            items: Mutex::new(items),
        }
    }

    /// Copy of what is currently persisted.
    pub fn snapshot(&self) -> Vec<Equipment> {
        self.lock().map(|items| items.clone()).unwrap_or_default()
    }

    fn lock(&self) -> BackendResult<MutexGuard<'_, Vec<Equipment>>> {
        self.items
            .lock()
            .map_err(|_| BackendError::Unavailable("memory backend lock poisoned".into()))
    }
}

#[async_trait]
impl EquipmentBackend for MemoryBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Embedded
    }

    async fn load_all(&self) -> BackendResult<Vec<Equipment>> {
        Ok(self.lock()?.clone())
    }

    async fn insert(&self, item: &Equipment) -> BackendResult<()> {
        self.lock()?.push(item.clone());
        Ok(())
    }

    async fn set_packed(&self, id: &str, is_packed: bool) -> BackendResult<()> {
        if let Some(item) = self.lock()?.iter_mut().find(|e| e.id == id) {
            item.is_packed = is_packed;
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> BackendResult<()> {
        self.lock()?.retain(|e| e.id != id);
        Ok(())
    }

    async fn store_image(&self, upload: &ImageUpload) -> BackendResult<String> {
        Ok(upload.to_data_uri())
    }
}
