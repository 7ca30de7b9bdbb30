//! # fotogear-db: Embedded Backend for Foto Gear
//!
//! Device-local persistence using SQLite through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Foto Gear Data Flow                              │
//! │                                                                         │
//! │  EquipmentStore (fotogear-store)                                       │
//! │       │  &dyn EquipmentBackend                                          │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   fotogear-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │ LocalStorage   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ Repository     │    │  (embedded)  │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  │            ▲                    ▲                               │   │
//! │  │            └──── EmbeddedBackend (JSON blob) ───┘                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/fotogear/fotogear.db                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fotogear_db::{Database, DbConfig, EmbeddedBackend};
//!
//! let db = Database::new(DbConfig::new("fotogear.db")).await?;
//! let backend = EmbeddedBackend::new(&db);
//! let items = backend.load_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod embedded;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use embedded::{EmbeddedBackend, EMBEDDED_STORAGE_KEY};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::local_storage::LocalStorageRepository;
