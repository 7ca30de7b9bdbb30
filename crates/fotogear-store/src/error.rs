//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  DbError / CloudError                                                  │
//! │       │  (From impls in the backend crates)                            │
//! │       ▼                                                                 │
//! │  BackendError ──► BackendError::AuthRequired ──► StoreError::AuthRequired│
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError::Backend { operation, source }                             │
//! │       │                                                                 │
//! │       ├──► Notifier::error("Could not add equipment")                  │
//! │       ├──► tracing::info!(...)                                         │
//! │       └──► returned to the caller                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use thiserror::Error;

use fotogear_core::ValidationError;

use crate::backend::BackendError;

/// Store operations, named in notifications and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Add,
    UploadImage,
    TogglePacked,
    Delete,
}

impl Operation {
    /// The generic user-facing failure message for this operation.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Load => "Could not load equipment",
            Operation::Add => "Could not add equipment",
            Operation::UploadImage => "Could not upload image",
            Operation::TogglePacked => "Could not update packed status",
            Operation::Delete => "Could not delete equipment",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Load => write!(f, "load"),
            Operation::Add => write!(f, "add"),
            Operation::UploadImage => write!(f, "upload image"),
            Operation::TogglePacked => write!(f, "toggle packed"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

/// Errors returned by [`EquipmentStore`](crate::EquipmentStore) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Input rejected before any backend call.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The remote backend has no signed-in owner.
    #[error("You must sign in first")]
    AuthRequired,

    /// The backend call failed; the collection kept its last known-good value.
    #[error("{operation} failed: {source}")]
    Backend {
        operation: Operation,
        #[source]
        source: BackendError,
    },
}

impl StoreError {
    /// Wraps a backend failure, lifting `AuthRequired` into its own variant.
    pub fn backend(operation: Operation, source: BackendError) -> Self {
        match source {
            BackendError::AuthRequired => StoreError::AuthRequired,
            source => StoreError::Backend { operation, source },
        }
    }

    /// The message shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Validation(e) => e.to_string(),
            StoreError::AuthRequired => "You must sign in first".to_string(),
            StoreError::Backend { operation, .. } => operation.failure_message().to_string(),
        }
    }

    /// True for input problems the user can fix by editing the form.
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_required_is_lifted() {
        let err = StoreError::backend(Operation::Add, BackendError::AuthRequired);
        assert_eq!(err, StoreError::AuthRequired);
    }

    #[test]
    fn test_backend_user_message_is_generic() {
        let err = StoreError::backend(
            Operation::TogglePacked,
            BackendError::Unavailable("connection reset".into()),
        );
        assert_eq!(err.user_message(), "Could not update packed status");
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn test_validation_message_is_specific() {
        let err: StoreError = ValidationError::Required {
            field: "name".into(),
        }
        .into();
        assert!(err.is_validation());
        assert_eq!(err.user_message(), "name is required");
    }
}
