//! # Cloud Error Types
//!
//! ## Error Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              CloudError               →   BackendError                  │
//! │                                                                         │
//! │  AuthRequired / SessionExpired        →   AuthRequired                  │
//! │  InvalidToken / HTTP 401              →   AuthRequired                  │
//! │  HTTP 403                             →   PermissionDenied              │
//! │  HTTP 413                             →   QuotaExceeded                 │
//! │  HTTP 5xx / Network / Timeout         →   Unavailable                   │
//! │  Decode                               →   Corrupt                       │
//! │  other HTTP / InvalidConfig           →   RequestFailed                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use fotogear_store::BackendError;

/// Result type alias for remote operations.
pub type CloudResult<T> = Result<T, CloudError>;

/// Remote backend errors.
#[derive(Debug, Error)]
pub enum CloudError {
    /// Remote configuration is unusable.
    #[error("Invalid remote configuration: {0}")]
    InvalidConfig(String),

    /// No session is available.
    #[error("Not signed in")]
    AuthRequired,

    /// The session's access token has expired.
    #[error("Session expired, sign in again")]
    SessionExpired,

    /// The access token could not be decoded.
    #[error("Invalid access token: {0}")]
    InvalidToken(String),

    /// Sign-in was rejected.
    #[error("Sign-in failed: {0}")]
    SignInFailed(String),

    /// HTTP 401.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// HTTP 403.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Any other non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Connection-level failure.
    #[error("Network error: {0}")]
    Network(String),

    /// Request ran past the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// Response body could not be decoded.
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl CloudError {
    /// Categorizes a non-success HTTP status.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 => CloudError::Unauthorized(body),
            403 => CloudError::Forbidden(body),
            _ => CloudError::Status { status, body },
        }
    }
}

impl From<reqwest::Error> for CloudError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CloudError::Timeout
        } else if err.is_decode() {
            CloudError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            CloudError::from_status(status.as_u16(), err.to_string())
        } else {
            CloudError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CloudError {
    fn from(err: serde_json::Error) -> Self {
        CloudError::Decode(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for CloudError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        CloudError::InvalidToken(err.to_string())
    }
}

impl From<url::ParseError> for CloudError {
    fn from(err: url::ParseError) -> Self {
        CloudError::InvalidConfig(err.to_string())
    }
}

impl From<CloudError> for BackendError {
    fn from(err: CloudError) -> Self {
        let message = err.to_string();
        match err {
            CloudError::AuthRequired
            | CloudError::SessionExpired
            | CloudError::InvalidToken(_)
            | CloudError::Unauthorized(_) => BackendError::AuthRequired,
            CloudError::Forbidden(_) => BackendError::PermissionDenied(message),
            CloudError::Status { status: 413, .. } => BackendError::QuotaExceeded(message),
            CloudError::Network(_) | CloudError::Timeout => BackendError::Unavailable(message),
            CloudError::Status { status, .. } if status >= 500 => {
                BackendError::Unavailable(message)
            }
            CloudError::Decode(_) => BackendError::Corrupt(message),
            CloudError::InvalidConfig(_) | CloudError::SignInFailed(_) | CloudError::Status { .. } => {
                BackendError::RequestFailed(message)
            }
        }
    }
}
