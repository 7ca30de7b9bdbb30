//! # fotogear-core: Pure Domain Logic for Foto Gear
//!
//! The record type, the field rules and the derived views of the equipment
//! tracker. Every function here is pure; persistence lives in the backend
//! crates and the owned collection lives in `fotogear-store`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Foto Gear Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    CLI (apps/cli)                               │   │
//! │  │    list ──► add ──► toggle ──► delete ──► progress             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                fotogear-store (EquipmentStore)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ fotogear-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   view    │  │   image   │  │ validation│  │   │
//! │  │   │ Equipment │  │  filter   │  │  Upload   │  │   rules   │  │   │
//! │  │   │ FilterMode│  │  counts   │  │  DataUri  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Equipment, EquipmentDraft, FilterMode)
//! - [`view`] - Filtered subsets, status counts, packing progress
//! - [`image`] - Image uploads and data-URI encoding
//! - [`error`] - Domain error types
//! - [`validation`] - Field rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use fotogear_core::{view, Equipment, EquipmentDraft, FilterMode};
//!
//! let draft = EquipmentDraft::new("Canon EOS R5").normalized().unwrap();
//! let camera = Equipment::create(draft, "https://img.example/r5.jpg").unwrap();
//! assert!(!camera.is_packed);
//!
//! let items = vec![camera];
//! let counts = view::counts(&items);
//! assert_eq!(counts.unpacked, 1);
//! assert_eq!(view::progress_percent(&counts), 0);
//! assert!(view::filter(&items, FilterMode::Packed).is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod image;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use image::ImageUpload;
pub use types::*;
pub use view::StatusCounts;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of an equipment name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of an equipment description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 300;

/// Maximum length of a category label, in characters.
pub const MAX_CATEGORY_LEN: usize = 50;

/// Maximum size of an image upload.
///
/// Oversized images are rejected before the store is ever called.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
