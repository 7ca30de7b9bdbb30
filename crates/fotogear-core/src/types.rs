//! # Domain Types
//!
//! Core domain types used throughout Foto Gear.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ EquipmentDraft  │   │    Equipment    │   │   FilterMode    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │──►│  id (UUID)      │   │  All            │       │
//! │  │  description?   │   │  name           │   │  Packed         │       │
//! │  │  category?      │   │  description?   │   │  Unpacked       │       │
//! │  └─────────────────┘   │  image_url      │   └─────────────────┘       │
//! │     user input          │  category?      │                             │
//! │                         │  is_packed      │                             │
//! │                         │  created_at     │                             │
//! │                         └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialized Shape
//! `Equipment` serializes in the camelCase shape the web frontend stores:
//! ```json
//! {
//!   "id": "550e8400-e29b-41d4-a716-446655440000",
//!   "name": "Canon EOS R5",
//!   "imageUrl": "data:image/jpeg;base64,...",
//!   "isPacked": false,
//!   "category": "Cameras",
//!   "createdAt": 1717243200000
//! }
//! ```
//! `createdAt` is milliseconds since the Unix epoch; absent optional fields
//! are omitted rather than written as `null`.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;
use crate::validation::{
    validate_category, validate_description, validate_image_url, validate_name, ValidationResult,
};

// =============================================================================
// Equipment
// =============================================================================

/// One piece of photography equipment.
///
/// Immutable after creation except for `is_packed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, trimmed, never empty.
    pub name: String,

    /// Optional free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub description: Option<String>,

    /// Photo: a public URL (remote) or a `data:` URI (embedded).
    pub image_url: String,

    /// Whether the item is in the bag.
    #[serde(default)]
    pub is_packed: bool,

    /// Optional grouping label ("Lenses", "Lighting").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub category: Option<String>,

    /// When the record was created.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[ts(type = "number")]
    pub created_at: DateTime<Utc>,
}

impl Equipment {
    /// Creates a new unpacked record with a fresh id and the current time,
    /// rounded up to the millisecond precision it is stored with.
    ///
    /// ## Rules
    /// The draft is normalized (see [`EquipmentDraft::normalized`]) and the
    /// image reference must be non-blank.
    pub fn create(draft: EquipmentDraft, image_url: impl AsRef<str>) -> ValidationResult<Self> {
        let draft = draft.normalized()?;
        let image_url = validate_image_url(image_url.as_ref())?;

        Ok(Equipment {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            description: draft.description,
            image_url,
            is_packed: false,
            category: draft.category,
            created_at: now_millis(),
        })
    }

    /// Returns a copy with `is_packed` set to the given value.
    pub fn with_packed(&self, is_packed: bool) -> Self {
        Equipment {
            is_packed,
            ..self.clone()
        }
    }
}

// =============================================================================
// Equipment Draft
// =============================================================================

/// Current time rounded up to a whole millisecond, never before the call.
fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    let truncated = now.trunc_subsecs(3);
    if truncated < now {
        truncated + Duration::milliseconds(1)
    } else {
        truncated
    }
}

/// User input for a new record, before an id and image are attached.
///
/// ## Example
/// ```rust
/// use fotogear_core::EquipmentDraft;
///
/// let draft = EquipmentDraft::new(" Godox V1 ")
///     .description("Flash, round head")
///     .category("")
///     .normalized()
///     .unwrap();
///
/// assert_eq!(draft.name, "Godox V1");
/// assert_eq!(draft.category, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentDraft {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl EquipmentDraft {
    /// Starts a draft with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        EquipmentDraft {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Trims every field, collapses blank optionals to `None`, and enforces
    /// the length caps.
    pub fn normalized(self) -> ValidationResult<Self> {
        Ok(EquipmentDraft {
            name: validate_name(&self.name)?,
            description: validate_description(self.description.as_deref())?,
            category: validate_category(self.category.as_deref())?,
        })
    }
}

// =============================================================================
// Filter Mode
// =============================================================================

/// Which subset of the collection is displayed.
///
/// Plain UI state: every mode is reachable from every other mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Every record.
    #[default]
    All,
    /// Only records with `is_packed = true`.
    Packed,
    /// Only records with `is_packed = false`.
    Unpacked,
}

impl FilterMode {
    /// All modes in display order.
    pub const ALL: [FilterMode; 3] = [FilterMode::All, FilterMode::Packed, FilterMode::Unpacked];

    /// Returns true if the record belongs to this subset.
    #[inline]
    pub fn matches(&self, item: &Equipment) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Packed => item.is_packed,
            FilterMode::Unpacked => !item.is_packed,
        }
    }

    /// Human-readable label for filter buttons.
    pub fn label(&self) -> &'static str {
        match self {
            FilterMode::All => "All",
            FilterMode::Packed => "Packed",
            FilterMode::Unpacked => "Pending",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::All => write!(f, "all"),
            FilterMode::Packed => write!(f, "packed"),
            FilterMode::Unpacked => write!(f, "unpacked"),
        }
    }
}

impl FromStr for FilterMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(FilterMode::All),
            "packed" => Ok(FilterMode::Packed),
            "unpacked" | "pending" => Ok(FilterMode::Unpacked),
            other => Err(CoreError::UnknownFilterMode(other.to_string())),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
