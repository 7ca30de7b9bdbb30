//! # Remote Configuration
//!
//! Where the hosted service lives and how requests are shaped.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  {url}/rest/v1/{table}                       rows (PostgREST)           │
//! │  {url}/storage/v1/object/{bucket}/{path}     upload                     │
//! │  {url}/storage/v1/object/public/{bucket}/…   public retrieval URL       │
//! │  {url}/auth/v1/token?grant_type=password     sign-in                    │
//! │  {url}/auth/v1/logout                        sign-out                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;
use url::Url;

use crate::error::{CloudError, CloudResult};

/// Default row table.
pub const DEFAULT_TABLE: &str = "equipment";

/// Default object-store bucket for photos.
pub const DEFAULT_BUCKET: &str = "equipment-images";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote service configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = RemoteConfig::new("https://abc.supabase.co", anon_key)?
///     .bucket("gear-photos")
///     .timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    base_url: String,
    anon_key: String,
    table: String,
    bucket: String,
    timeout: Duration,
}

impl RemoteConfig {
    /// Validates the base URL (http or https, with a host).
    pub fn new(base_url: &str, anon_key: impl Into<String>) -> CloudResult<Self> {
        let parsed = Url::parse(base_url.trim())?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CloudError::InvalidConfig(format!(
                "remote url must be http or https, got '{}'",
                parsed.scheme()
            )));
        }
        if parsed.host_str().is_none() {
            return Err(CloudError::InvalidConfig("remote url has no host".into()));
        }

        let anon_key = anon_key.into();
        if anon_key.trim().is_empty() {
            return Err(CloudError::InvalidConfig("anon key is empty".into()));
        }

        Ok(RemoteConfig {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            anon_key,
            table: DEFAULT_TABLE.to_string(),
            bucket: DEFAULT_BUCKET.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket
    }

    pub fn request_timeout(&self) -> Duration {
        self.timeout
    }

    // =========================================================================
    // Endpoint builders
    // =========================================================================

    /// `{url}/rest/v1/{table}`
    pub fn table_url(&self) -> CloudResult<Url> {
        Ok(Url::parse(&format!("{}/rest/v1/{}", self.base_url, self.table))?)
    }

    /// Every row of `owner`, oldest first.
    pub fn list_url(&self, owner: &str) -> CloudResult<Url> {
        let mut url = self.table_url()?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("user_id", &format!("eq.{owner}"))
            .append_pair("order", "created_at.asc");
        Ok(url)
    }

    /// Exactly one row of `owner`.
    pub fn row_url(&self, id: &str, owner: &str) -> CloudResult<Url> {
        let mut url = self.table_url()?;
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{id}"))
            .append_pair("user_id", &format!("eq.{owner}"));
        Ok(url)
    }

    /// Upload target for an object path inside the bucket.
    pub fn upload_url(&self, path: &str) -> CloudResult<Url> {
        Ok(Url::parse(&format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url, self.bucket, path
        ))?)
    }

    /// Public retrieval URL for an object path inside the bucket.
    pub fn public_object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        )
    }

    pub fn token_url(&self) -> CloudResult<Url> {
        let mut url = Url::parse(&format!("{}/auth/v1/token", self.base_url))?;
        url.query_pairs_mut().append_pair("grant_type", "password");
        Ok(url)
    }

    pub fn logout_url(&self) -> CloudResult<Url> {
        Ok(Url::parse(&format!("{}/auth/v1/logout", self.base_url))?)
    }
}
