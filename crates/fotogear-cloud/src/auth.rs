//! # Authentication Context
//!
//! Supplies the owner id and access token for remote requests.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Session Lifecycle                                  │
//! │                                                                         │
//! │  fotogear login --email … --password …                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AuthClient::sign_in_with_password ──► POST /auth/v1/token             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Session::from_access_token ← sub = owner id, exp = expiry            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CLI persists session.json                                             │
//! │                                                                         │
//! │  [Later command]                                                       │
//! │  StaticSession::new(Some(session)) ──► RemoteBackend                   │
//! │       │                                                                 │
//! │       ├── expired? ──► treated as absent ──► AuthRequired              │
//! │       └── valid    ──► apikey + Bearer headers                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The token is issued by the service; its signature is verified there on
//! every request. Locally only the claims are read.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::RemoteConfig;
use crate::error::{CloudError, CloudResult};

// =============================================================================
// Session
// =============================================================================

/// Claims read from the access token.
#[derive(Debug, Deserialize)]
struct AccessClaims {
    sub: String,
    exp: i64,
    #[serde(default)]
    email: Option<String>,
}

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Owner id (`sub` claim); every row is scoped by it.
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Builds a session from the claims of an access token.
    pub fn from_access_token(token: &str) -> CloudResult<Self> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::from(["sub".to_string(), "exp".to_string()]);

        let data = decode::<AccessClaims>(token, &DecodingKey::from_secret(&[]), &validation)?;
        let claims = data.claims;

        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .ok_or_else(|| CloudError::InvalidToken(format!("exp out of range: {}", claims.exp)))?;

        if claims.sub.trim().is_empty() {
            return Err(CloudError::InvalidToken("empty sub claim".into()));
        }

        Ok(Session {
            access_token: token.to_string(),
            refresh_token: None,
            user_id: claims.sub,
            email: claims.email,
            expires_at,
        })
    }

    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

// =============================================================================
// Auth Context
// =============================================================================

/// Source of the current session for remote requests.
pub trait AuthContext: Send + Sync {
    /// The current non-expired session, if any.
    fn session(&self) -> Option<Session>;

    /// The current session, or the error that explains its absence.
    fn require_session(&self) -> CloudResult<Session> {
        self.session().ok_or(CloudError::AuthRequired)
    }
}

/// A session fixed for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    session: Option<Session>,
}

impl StaticSession {
    pub fn new(session: Option<Session>) -> Self {
        StaticSession { session }
    }

    /// No-one signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Decodes a raw access token (from config or environment).
    pub fn from_access_token(token: &str) -> CloudResult<Self> {
        Ok(StaticSession::new(Some(Session::from_access_token(token)?)))
    }
}

impl AuthContext for StaticSession {
    fn session(&self) -> Option<Session> {
        match &self.session {
            Some(session) if session.is_expired() => {
                info!(user_id = %session.user_id, "Stored session has expired");
                None
            }
            other => other.clone(),
        }
    }

    fn require_session(&self) -> CloudResult<Session> {
        match &self.session {
            None => Err(CloudError::AuthRequired),
            Some(session) if session.is_expired() => Err(CloudError::SessionExpired),
            Some(session) => Ok(session.clone()),
        }
    }
}

// =============================================================================
// Sign-in
// =============================================================================

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthErrorBody {
    #[serde(default, alias = "error_description", alias = "msg")]
    message: Option<String>,
}

/// Client for the service's auth endpoints.
pub struct AuthClient {
    http: reqwest::Client,
    config: RemoteConfig,
}

impl AuthClient {
    pub fn new(config: RemoteConfig) -> CloudResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| CloudError::InvalidConfig(e.to_string()))?;
        Ok(AuthClient { http, config })
    }

    /// Exchanges email and password for a session.
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> CloudResult<Session> {
        debug!(email = %email, "Signing in");

        let response = self
            .http
            .post(self.config.token_url()?)
            .header("apikey", self.config.anon_key())
            .json(&PasswordGrant { email, password })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AuthErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(body);
            info!(status = status.as_u16(), "Sign-in rejected");
            return Err(CloudError::SignInFailed(message));
        }

        let tokens: TokenResponse = response.json().await?;
        let mut session = Session::from_access_token(&tokens.access_token)?;
        if let Some(refresh) = tokens.refresh_token {
            session = session.with_refresh_token(refresh);
        }

        info!(user_id = %session.user_id, "Signed in");
        Ok(session)
    }

    /// Revokes the session on the service.
    pub async fn sign_out(&self, session: &Session) -> CloudResult<()> {
        let response = self
            .http
            .post(self.config.logout_url()?)
            .header("apikey", self.config.anon_key())
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CloudError::from_status(status.as_u16(), body));
        }

        info!(user_id = %session.user_id, "Signed out");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
