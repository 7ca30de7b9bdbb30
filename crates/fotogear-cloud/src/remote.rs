//! # Remote Backend
//!
//! [`EquipmentBackend`] over the REST row store and object store.
//!
//! ## Request Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  operation        request                                               │
//! │  ─────────        ───────                                               │
//! │  load_all         GET    /rest/v1/equipment?select=*&user_id=eq.{me}    │
//! │                                           &order=created_at.asc         │
//! │  insert           POST   /rest/v1/equipment          (row JSON)         │
//! │  set_packed       PATCH  /rest/v1/equipment?id=eq.{id}&user_id=eq.{me}  │
//! │  delete           DELETE /rest/v1/equipment?id=eq.{id}&user_id=eq.{me}  │
//! │  store_image      POST   /storage/v1/object/{bucket}/{me}/{uuid}.{ext}  │
//! │                                                                         │
//! │  every request:   apikey: <anon key>                                    │
//! │                   Authorization: Bearer <access token>                  │
//! │  writes:          Prefer: return=minimal                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No session means no request: every operation fails with `AuthRequired`
//! before touching the network.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

use fotogear_core::{Equipment, ImageUpload};
use fotogear_store::{BackendKind, BackendResult, EquipmentBackend};

use crate::auth::{AuthContext, Session};
use crate::config::RemoteConfig;
use crate::error::{CloudError, CloudResult};
use crate::rows::{EquipmentRow, PackedPatch};

/// Object path for an uploaded photo: `{owner}/{uuid}.{ext}`.
pub fn object_path(owner: &str, extension: &str) -> String {
    format!("{}/{}.{}", owner, Uuid::new_v4(), extension)
}

/// Remote implementation of the backend contract.
pub struct RemoteBackend {
    http: reqwest::Client,
    config: RemoteConfig,
    auth: Arc<dyn AuthContext>,
}

impl RemoteBackend {
    pub fn new(config: RemoteConfig, auth: Arc<dyn AuthContext>) -> CloudResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| CloudError::InvalidConfig(e.to_string()))?;

        Ok(RemoteBackend { http, config, auth })
    }

    fn request(&self, method: Method, url: Url, session: &Session) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", self.config.anon_key())
            .bearer_auth(&session.access_token)
    }

    fn write(&self, method: Method, url: Url, session: &Session) -> RequestBuilder {
        self.request(method, url, session)
            .header("Prefer", "return=minimal")
    }

    async fn send(request: RequestBuilder) -> CloudResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        info!(status = status.as_u16(), body = %body, "Remote request rejected");
        Err(CloudError::from_status(status.as_u16(), body))
    }

    async fn fetch_rows(&self) -> CloudResult<Vec<Equipment>> {
        let session = self.auth.require_session()?;
        let url = self.config.list_url(&session.user_id)?;

        debug!(user_id = %session.user_id, "Fetching equipment rows");
        let response = Self::send(self.request(Method::GET, url, &session)).await?;
        let rows: Vec<EquipmentRow> = response.json().await?;

        Ok(rows.into_iter().map(Equipment::from).collect())
    }

    async fn insert_row(&self, item: &Equipment) -> CloudResult<()> {
        let session = self.auth.require_session()?;
        let row = EquipmentRow::from_equipment(item, &session.user_id);
        let url = self.config.table_url()?;

        debug!(id = %row.id, "Inserting equipment row");
        Self::send(self.write(Method::POST, url, &session).json(&row)).await?;
        Ok(())
    }

    async fn patch_packed(&self, id: &str, is_packed: bool) -> CloudResult<()> {
        let session = self.auth.require_session()?;
        let url = self.config.row_url(id, &session.user_id)?;

        debug!(id = %id, is_packed, "Updating packed flag");
        Self::send(
            self.write(Method::PATCH, url, &session)
                .json(&PackedPatch { is_packed }),
        )
        .await?;
        Ok(())
    }

    async fn delete_row(&self, id: &str) -> CloudResult<()> {
        let session = self.auth.require_session()?;
        let url = self.config.row_url(id, &session.user_id)?;

        debug!(id = %id, "Deleting equipment row");
        Self::send(self.write(Method::DELETE, url, &session)).await?;
        Ok(())
    }

    async fn upload(&self, upload: &ImageUpload) -> CloudResult<String> {
        let session = self.auth.require_session()?;
        let path = object_path(&session.user_id, upload.extension());
        let url = self.config.upload_url(&path)?;

        debug!(path = %path, bytes = upload.len(), "Uploading image");
        Self::send(
            self.request(Method::POST, url, &session)
                .header(reqwest::header::CONTENT_TYPE, upload.content_type())
                .body(upload.bytes().to_vec()),
        )
        .await?;

        info!(path = %path, "Image uploaded");
        Ok(self.config.public_object_url(&path))
    }
}

#[async_trait]
impl EquipmentBackend for RemoteBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Remote
    }

    async fn load_all(&self) -> BackendResult<Vec<Equipment>> {
        Ok(self.fetch_rows().await?)
    }

    async fn insert(&self, item: &Equipment) -> BackendResult<()> {
        Ok(self.insert_row(item).await?)
    }

    async fn set_packed(&self, id: &str, is_packed: bool) -> BackendResult<()> {
        Ok(self.patch_packed(id, is_packed).await?)
    }

    async fn delete(&self, id: &str) -> BackendResult<()> {
        Ok(self.delete_row(id).await?)
    }

    async fn store_image(&self, upload: &ImageUpload) -> BackendResult<String> {
        Ok(self.upload(upload).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
