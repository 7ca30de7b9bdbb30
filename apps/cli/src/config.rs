//! # CLI Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     FOTOGEAR_BACKEND=remote                                            │
//! │     FOTOGEAR_DB_PATH=/tmp/gear.db                                      │
//! │     FOTOGEAR_REMOTE_URL / FOTOGEAR_ANON_KEY / FOTOGEAR_BUCKET          │
//! │     FOTOGEAR_ACCESS_TOKEN                                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/fotogear/config.toml (Linux)                             │
//! │     ~/Library/Application Support/com.fotogear.fotogear/config.toml    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     embedded backend, database in the platform data directory          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! backend = "remote"  # embedded | remote
//!
//! [embedded]
//! db_path = "/home/ana/gear.db"
//! quota_bytes = 5242880
//!
//! [remote]
//! url = "https://abc.supabase.co"
//! anon_key = "eyJhbGciOi..."
//! table = "equipment"
//! bucket = "equipment-images"
//! timeout_secs = 30
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;

use fotogear_cloud::{DEFAULT_BUCKET, DEFAULT_TABLE};
use fotogear_store::BackendKind;

use crate::error::{CliError, CliResult};

const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "fotogear.db";
const SESSION_FILE: &str = "session.json";

// =============================================================================
// Sections
// =============================================================================

/// Settings for the embedded backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedSettings {
    /// SQLite file. Default: `<data dir>/fotogear.db`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,

    /// Bound on local storage size in bytes. Default: unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_bytes: Option<usize>,
}

/// Settings for the remote backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anon_key: Option<String>,

    #[serde(default = "default_table")]
    pub table: String,

    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Raw access token; takes precedence over the saved session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_bucket() -> String {
    DEFAULT_BUCKET.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for RemoteSettings {
    fn default() -> Self {
        RemoteSettings {
            url: None,
            anon_key: None,
            table: default_table(),
            bucket: default_bucket(),
            timeout_secs: default_timeout_secs(),
            access_token: None,
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendKind,

    #[serde(default)]
    pub embedded: EmbeddedSettings,

    #[serde(default)]
    pub remote: RemoteSettings,

    /// Where the database and session live. Not read from the file.
    #[serde(skip)]
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Loads file, then environment, then the `--backend` flag, then validates.
    ///
    /// A missing file is not an error; the defaults apply.
    pub fn load(path: Option<&Path>, backend: Option<BackendKind>) -> CliResult<Self> {
        let dirs = project_dirs();
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => dirs.as_ref().map(|d| d.config_dir().join(CONFIG_FILE)),
        };

        let mut config = match &path {
            Some(p) if p.exists() => {
                info!(path = %p.display(), "Loading configuration");
                let text = std::fs::read_to_string(p).map_err(|e| CliError::io(p, e))?;
                Self::from_toml(&text)?
            }
            _ => {
                debug!("No config file, using defaults");
                AppConfig::default()
            }
        };

        config.data_dir = dirs
            .map(|d| d.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        config.apply_env();
        if let Some(kind) = backend {
            config.backend = kind;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(text: &str) -> CliResult<Self> {
        toml::from_str(text).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Applies `FOTOGEAR_*` overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any lookup (the process environment in `load`).
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(raw) = get("FOTOGEAR_BACKEND") {
            match raw.parse() {
                Ok(kind) => self.backend = kind,
                Err(e) => tracing::warn!(error = %e, "Ignoring FOTOGEAR_BACKEND"),
            }
        }
        if let Some(path) = get("FOTOGEAR_DB_PATH") {
            self.embedded.db_path = Some(PathBuf::from(path));
        }
        if let Some(url) = get("FOTOGEAR_REMOTE_URL") {
            self.remote.url = Some(url);
        }
        if let Some(key) = get("FOTOGEAR_ANON_KEY") {
            self.remote.anon_key = Some(key);
        }
        if let Some(bucket) = get("FOTOGEAR_BUCKET") {
            self.remote.bucket = bucket;
        }
        if let Some(token) = get("FOTOGEAR_ACCESS_TOKEN") {
            self.remote.access_token = Some(token);
        }
    }

    /// Checks the settings the selected backend needs.
    pub fn validate(&self) -> CliResult<()> {
        if self.embedded.quota_bytes == Some(0) {
            return Err(CliError::Config("embedded.quota_bytes must be positive".into()));
        }

        if self.backend == BackendKind::Remote {
            let url = self
                .remote
                .url
                .as_deref()
                .ok_or_else(|| CliError::Config("remote.url is required for the remote backend".into()))?;
            let parsed =
                Url::parse(url).map_err(|e| CliError::Config(format!("remote.url: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(CliError::Config("remote.url must be http or https".into()));
            }
            if self.remote.anon_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
                return Err(CliError::Config(
                    "remote.anon_key is required for the remote backend".into(),
                ));
            }
            if self.remote.timeout_secs == 0 {
                return Err(CliError::Config("remote.timeout_secs must be positive".into()));
            }
            if self.remote.table.trim().is_empty() || self.remote.bucket.trim().is_empty() {
                return Err(CliError::Config("remote.table and remote.bucket must be set".into()));
            }
        }

        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.embedded
            .db_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join(DATABASE_FILE))
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE)
    }

    /// TOML for display, with secrets masked.
    pub fn to_display_toml(&self) -> CliResult<String> {
        let mut shown = self.clone();
        shown.remote.anon_key = shown.remote.anon_key.as_deref().map(mask);
        shown.remote.access_token = shown.remote.access_token.as_deref().map(mask);
        if shown.embedded.db_path.is_none() {
            shown.embedded.db_path = Some(self.database_path());
        }
        toml::to_string_pretty(&shown).map_err(|e| CliError::Config(e.to_string()))
    }
}

/// Platform directories for Foto Gear.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "fotogear", "fotogear")
}

fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}…")
}

// =============================================================================
// Unit Tests
// =============================================================================
