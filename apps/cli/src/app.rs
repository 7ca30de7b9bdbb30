//! # Backend Wiring
//!
//! Turns an [`AppConfig`] into a loaded [`EquipmentStore`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  backend = "embedded"                                                   │
//! │     DbConfig(database_path, quota) ─► Database ─► EmbeddedBackend       │
//! │                                                                         │
//! │  backend = "remote"                                                     │
//! │     RemoteConfig(url, anon_key, table, bucket, timeout)                 │
//! │     session: access_token setting ─► else session.json ─► else none    │
//! │                                   ─► RemoteBackend                     │
//! │                                                                         │
//! │  either ─► EquipmentStore::new(backend, ConsoleNotifier) ─► load()      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use fotogear_cloud::{RemoteBackend, RemoteConfig, StaticSession};
use fotogear_db::{Database, DbConfig, EmbeddedBackend};
use fotogear_store::{BackendKind, EquipmentBackend, EquipmentStore, Notifier};

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};
use crate::session::SessionFile;

/// Opens the configured backend.
pub async fn open_backend(config: &AppConfig) -> CliResult<Arc<dyn EquipmentBackend>> {
    match config.backend {
        BackendKind::Embedded => {
            let mut db_config = DbConfig::new(config.database_path());
            if let Some(quota) = config.embedded.quota_bytes {
                db_config = db_config.quota_bytes(quota);
            }

            let db = Database::new(db_config).await?;
            info!(path = %config.database_path().display(), "Embedded backend ready");
            Ok(Arc::new(EmbeddedBackend::new(&db)))
        }
        BackendKind::Remote => {
            let remote = remote_config(config)?;
            let auth = remote_session(config).await?;
            info!(url = %remote.base_url(), "Remote backend ready");
            Ok(Arc::new(RemoteBackend::new(remote, Arc::new(auth))?))
        }
    }
}

/// Opens the configured backend and loads the collection.
pub async fn open_store(
    config: &AppConfig,
    notifier: Arc<dyn Notifier>,
) -> CliResult<EquipmentStore> {
    let backend = open_backend(config).await?;
    let mut store = EquipmentStore::new(backend, notifier);
    store.load().await?;
    Ok(store)
}

/// Remote settings as a validated [`RemoteConfig`].
pub fn remote_config(config: &AppConfig) -> CliResult<RemoteConfig> {
    let url = config
        .remote
        .url
        .as_deref()
        .ok_or_else(|| CliError::Config("remote.url is not set".into()))?;
    let anon_key = config
        .remote
        .anon_key
        .clone()
        .ok_or_else(|| CliError::Config("remote.anon_key is not set".into()))?;

    Ok(RemoteConfig::new(url, anon_key)?
        .table(&config.remote.table)
        .bucket(&config.remote.bucket)
        .timeout(Duration::from_secs(config.remote.timeout_secs)))
}

async fn remote_session(config: &AppConfig) -> CliResult<StaticSession> {
    if let Some(token) = config.remote.access_token.as_deref() {
        debug!("Using the configured access token");
        return Ok(StaticSession::from_access_token(token)?);
    }

    let saved = SessionFile::new(config.session_path()).load().await;
    if saved.is_none() {
        debug!("No session; remote operations will ask for sign-in");
    }
    Ok(StaticSession::new(saved))
}
