//! # fotogear-store: The Equipment Store
//!
//! One explicitly owned object holds the equipment collection for an
//! application session. It is built once with an injected backend and an
//! injected notification sink, then passed by reference to whoever renders.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Shell (CLI)                                                           │
//! │       │  store.toggle_packed(id).await                                  │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  fotogear-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   EquipmentStore ──► Box<dyn EquipmentBackend> ──┐              │   │
//! │  │        │                                         │              │   │
//! │  │        └──► Arc<dyn Notifier> (toasts)           │              │   │
//! │  └──────────────────────────────────────────────────┼──────────────┘   │
//! │                                                     │                   │
//! │                     ┌───────────────────────────────┴─────────┐         │
//! │                     ▼                                         ▼         │
//! │            EmbeddedBackend (fotogear-db)         RemoteBackend          │
//! │            one JSON blob, rewritten              (fotogear-cloud)       │
//! │                                                  one request / change   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`backend`] - The `EquipmentBackend` trait and `BackendError`
//! - [`store`] - `EquipmentStore`, the owned collection
//! - [`notify`] - User-visible notification sink
//! - [`memory`] - In-process backend (tests, demos)
//! - [`error`] - `StoreError`

pub mod backend;
pub mod error;
pub mod memory;
pub mod notify;
pub mod store;

pub use backend::{BackendError, BackendKind, BackendResult, EquipmentBackend};
pub use error::{Operation, StoreError, StoreResult};
pub use memory::MemoryBackend;
pub use notify::{NoOpNotifier, Notification, Notifier, RecordingNotifier};
pub use store::{EquipmentStore, MutationOutcome};
