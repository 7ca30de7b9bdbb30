//! # Validation Module
//!
//! Field rules for equipment records.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Shell (CLI / web form)                                       │
//! │  ├── Image size bound before reading the file into the store           │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: EquipmentStore::add                                          │
//! │  └── THIS MODULE: trims, length caps, required fields                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── Remote table NOT NULL constraints                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lengths are counted in characters, not bytes, so "Objetivo 50mm f/1.8 ñ"
//! is measured the way the user typed it.

use crate::error::ValidationError;
use crate::{MAX_CATEGORY_LEN, MAX_DESCRIPTION_LEN, MAX_IMAGE_BYTES, MAX_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an equipment name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 100 characters after trimming
///
/// ## Returns
/// The trimmed name.
///
/// ## Example
/// ```rust
/// use fotogear_core::validation::validate_name;
///
/// assert_eq!(validate_name("  Canon EOS R5 ").unwrap(), "Canon EOS R5");
/// assert!(validate_name("   ").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::too_long("name", MAX_NAME_LEN));
    }

    Ok(name.to_string())
}

/// Validates an optional description.
///
/// Blank input collapses to `None`.
pub fn validate_description(description: Option<&str>) -> ValidationResult<Option<String>> {
    optional_text("description", description, MAX_DESCRIPTION_LEN)
}

/// Validates an optional category label.
///
/// Blank input collapses to `None`.
pub fn validate_category(category: Option<&str>) -> ValidationResult<Option<String>> {
    optional_text("category", category, MAX_CATEGORY_LEN)
}

/// Validates the image reference of a new record.
///
/// Accepts any non-blank URI, including `data:` URIs.
pub fn validate_image_url(image_url: &str) -> ValidationResult<String> {
    let image_url = image_url.trim();

    if image_url.is_empty() {
        return Err(ValidationError::required("imageUrl"));
    }

    Ok(image_url.to_string())
}

fn optional_text(field: &str, value: Option<&str>, max: usize) -> ValidationResult<Option<String>> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    if value.chars().count() > max {
        return Err(ValidationError::too_long(field, max));
    }

    Ok(Some(value.to_string()))
}

// =============================================================================
// Size Validators
// =============================================================================

/// Validates an image payload size.
///
/// ## Rules
/// - Must not be empty
/// - Must not exceed [`MAX_IMAGE_BYTES`] (5 MiB)
///
/// ## Example
/// ```rust
/// use fotogear_core::validation::validate_image_size;
///
/// assert!(validate_image_size(1024).is_ok());
/// assert!(validate_image_size(0).is_err());
/// assert!(validate_image_size(6 * 1024 * 1024).is_err());
/// ```
pub fn validate_image_size(len: usize) -> ValidationResult<()> {
    if len == 0 {
        return Err(ValidationError::required("image"));
    }

    if len > MAX_IMAGE_BYTES {
        return Err(ValidationError::ImageTooLarge {
            max_bytes: MAX_IMAGE_BYTES,
            actual_bytes: len,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("Sony A7 IV").unwrap(), "Sony A7 IV");
        assert_eq!(validate_name("  Tripod  ").unwrap(), "Tripod");

        assert!(validate_name("").is_err());
        assert!(validate_name(" \t\n ").is_err());
        assert!(validate_name(&"A".repeat(101)).is_err());
        assert!(validate_name(&"A".repeat(100)).is_ok());
    }

    #[test]
    fn test_name_length_counts_characters() {
        // 100 two-byte characters is 200 bytes but still within the cap.
        assert!(validate_name(&"ñ".repeat(100)).is_ok());
        assert!(validate_name(&"ñ".repeat(101)).is_err());
    }

    #[test]
    fn test_optional_fields_collapse_blank_to_none() {
        assert_eq!(validate_description(None).unwrap(), None);
        assert_eq!(validate_description(Some("")).unwrap(), None);
        assert_eq!(validate_category(Some("   ")).unwrap(), None);
        assert_eq!(
            validate_category(Some(" Lenses ")).unwrap(),
            Some("Lenses".to_string())
        );
    }

    #[test]
    fn test_optional_field_caps() {
        assert!(validate_description(Some(&"d".repeat(300))).is_ok());
        assert!(validate_description(Some(&"d".repeat(301))).is_err());
        assert!(validate_category(Some(&"c".repeat(50))).is_ok());
        assert_eq!(
            validate_category(Some(&"c".repeat(51))).unwrap_err(),
            ValidationError::too_long("category", 50)
        );
    }

    #[test]
    fn test_validate_image_url() {
        assert!(validate_image_url("data:image/png;base64,AAAA").is_ok());
        assert!(validate_image_url("https://cdn.example/lens.jpg").is_ok());
        assert_eq!(
            validate_image_url("  ").unwrap_err(),
            ValidationError::required("imageUrl")
        );
    }

    #[test]
    fn test_validate_image_size_boundary() {
        assert!(validate_image_size(MAX_IMAGE_BYTES).is_ok());
        assert!(matches!(
            validate_image_size(MAX_IMAGE_BYTES + 1),
            Err(ValidationError::ImageTooLarge { .. })
        ));
    }
}
