//! # Saved Session
//!
//! The remote session survives between invocations as `session.json` in the
//! data directory. `login` writes it, `logout` removes it.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use fotogear_cloud::Session;

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SessionFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved session. A missing or unreadable file reads as none.
    pub async fn load(&self) -> Option<Session> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "No saved session");
                return None;
            }
        };

        match serde_json::from_str(&text) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                None
            }
        }
    }

    pub async fn save(&self, session: &Session) -> CliResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CliError::io(parent, e))?;
        }

        let json = serde_json::to_string_pretty(session)
            .map_err(|e| CliError::Config(e.to_string()))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| CliError::io(&self.path, e))
    }

    /// Removes the saved session. Returns whether one existed.
    pub async fn clear(&self) -> CliResult<bool> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CliError::io(&self.path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        serde_json::from_str(
            r#"{
                "access_token": "header.payload.sig",
                "user_id": "user-1",
                "expires_at": "2099-01-01T00:00:00Z"
            }"#,
        )
        .unwrap()
    }

    fn scratch() -> SessionFile {
        let dir = std::env::temp_dir().join(format!("fotogear-test-{}", uuid::Uuid::new_v4()));
        SessionFile::new(dir.join("session.json"))
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let file = scratch();
        assert!(file.load().await.is_none());

        file.save(&session()).await.unwrap();
        let loaded = file.load().await.unwrap();
        assert_eq!(loaded.user_id, "user-1");

        assert!(file.clear().await.unwrap());
        assert!(!file.clear().await.unwrap());
        assert!(file.load().await.is_none());
    }

    #[tokio::test]
    async fn test_garbage_file_reads_as_none() {
        let file = scratch();
        tokio::fs::create_dir_all(file.path().parent().unwrap())
            .await
            .unwrap();
        tokio::fs::write(file.path(), "not json").await.unwrap();

        assert!(file.load().await.is_none());
    }
}
