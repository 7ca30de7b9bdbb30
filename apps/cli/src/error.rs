//! # CLI Error Type
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the CLI                                │
//! │                                                                         │
//! │  command                                                               │
//! │     │                                                                   │
//! │     ├── StoreError ─── already shown by ConsoleNotifier ──┐            │
//! │     ├── CloudError (login/logout) ────────────────────────┤            │
//! │     ├── DbError (opening the database) ───────────────────┼──► CliError│
//! │     ├── CoreError (image type) ───────────────────────────┤            │
//! │     └── Config / Io / Output ─────────────────────────────┘            │
//! │                                                   │                     │
//! │                                                   ▼                     │
//! │                          stderr message + exit code (sysexits)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;

use fotogear_cloud::CloudError;
use fotogear_core::CoreError;
use fotogear_db::DbError;
use fotogear_store::StoreError;

/// Machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad flags or input data (EX_DATAERR).
    ValidationError,
    /// Not signed in (EX_NOPERM).
    AuthRequired,
    /// Backend unreachable or rejected the request (EX_UNAVAILABLE).
    BackendError,
    /// File system problem (EX_IOERR).
    IoError,
    /// Config file or environment unusable (EX_CONFIG).
    ConfigError,
}

impl ErrorCode {
    pub fn exit_code(&self) -> u8 {
        match self {
            ErrorCode::ValidationError => 65,
            ErrorCode::AuthRequired => 77,
            ErrorCode::BackendError => 69,
            ErrorCode::IoError => 74,
            ErrorCode::ConfigError => 78,
        }
    }
}

/// Everything a command can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cloud(#[from] CloudError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Could not render output: {0}")]
    Output(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CliError::Config(_) => ErrorCode::ConfigError,
            CliError::Store(StoreError::Validation(_)) => ErrorCode::ValidationError,
            CliError::Store(StoreError::AuthRequired) => ErrorCode::AuthRequired,
            CliError::Store(StoreError::Backend { .. }) => ErrorCode::BackendError,
            CliError::Cloud(
                CloudError::AuthRequired
                | CloudError::SessionExpired
                | CloudError::InvalidToken(_)
                | CloudError::SignInFailed(_)
                | CloudError::Unauthorized(_),
            ) => ErrorCode::AuthRequired,
            CliError::Cloud(CloudError::InvalidConfig(_)) => ErrorCode::ConfigError,
            CliError::Cloud(_) | CliError::Db(_) => ErrorCode::BackendError,
            CliError::Core(_) => ErrorCode::ValidationError,
            CliError::Io { .. } | CliError::Output(_) => ErrorCode::IoError,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.code().exit_code()
    }

    /// Store failures were already shown to the user as a notification.
    pub fn already_reported(&self) -> bool {
        matches!(self, CliError::Store(_))
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use fotogear_core::ValidationError;
    use fotogear_store::{BackendError, Operation};

    #[test]
    fn test_exit_codes() {
        let validation: CliError = StoreError::Validation(ValidationError::Required {
            field: "name".into(),
        })
        .into();
        assert_eq!(validation.exit_code(), 65);
        assert!(validation.already_reported());

        let auth: CliError = StoreError::AuthRequired.into();
        assert_eq!(auth.code(), ErrorCode::AuthRequired);

        let backend: CliError =
            StoreError::backend(Operation::Load, BackendError::Unavailable("x".into())).into();
        assert_eq!(backend.exit_code(), 69);

        assert_eq!(CliError::Config("bad".into()).exit_code(), 78);
        assert!(!CliError::Config("bad".into()).already_reported());
    }

    #[test]
    fn test_unsupported_image_is_validation() {
        let err: CliError = CoreError::UnsupportedImageType("txt".into()).into();
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    #[test]
    fn test_io_error_names_the_path() {
        let err = CliError::io(
            Path::new("/nope/photo.jpg"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.exit_code(), 74);
        assert!(err.to_string().starts_with("/nope/photo.jpg"));
    }
}
