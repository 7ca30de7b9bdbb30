//! # Repository Module
//!
//! SQL lives here and nowhere else in the crate.
//!
//! ## Available Repositories
//!
//! - [`LocalStorageRepository`](local_storage::LocalStorageRepository) -
//!   string key/value slot with an optional byte quota

pub mod local_storage;
