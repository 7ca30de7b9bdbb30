//! # fotogear-cloud: Remote Backend for Foto Gear
//!
//! Keeps the collection in a hosted table, one row per record, scoped by the
//! signed-in owner. Photos go to an object-store bucket and only their
//! public URL is stored in the row.
//!
//! ## Module Organization
//!
//! - [`config`] - Base URL, keys, table, bucket, timeout, endpoint builders
//! - [`auth`] - Session decoding, auth context, password sign-in
//! - [`rows`] - Row shapes and mapping to [`Equipment`](fotogear_core::Equipment)
//! - [`remote`] - [`RemoteBackend`], the `EquipmentBackend` implementation
//! - [`error`] - `CloudError` and its mapping to `BackendError`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fotogear_cloud::{RemoteBackend, RemoteConfig, StaticSession};
//!
//! let config = RemoteConfig::new("https://abc.supabase.co", anon_key)?;
//! let auth = Arc::new(StaticSession::new(Some(session)));
//! let backend = RemoteBackend::new(config, auth)?;
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod remote;
pub mod rows;

pub use auth::{AuthClient, AuthContext, Session, StaticSession};
pub use config::{RemoteConfig, DEFAULT_BUCKET, DEFAULT_TABLE, DEFAULT_TIMEOUT};
pub use error::{CloudError, CloudResult};
pub use remote::{object_path, RemoteBackend};
pub use rows::EquipmentRow;
