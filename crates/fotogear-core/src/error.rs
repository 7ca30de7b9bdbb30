//! # Error Types
//!
//! Domain-specific error types for fotogear-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fotogear-core errors (this file)                                      │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  backend crates                                                        │
//! │  ├── DbError          - Embedded storage failures (fotogear-db)        │
//! │  └── CloudError       - Remote request failures (fotogear-cloud)       │
//! │                                                                         │
//! │  fotogear-store                                                        │
//! │  └── StoreError       - What the shell sees (+ a notification)         │
//! │                                                                         │
//! │  Flow: ValidationError → StoreError ← BackendError ← DbError/CloudError│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Filter mode string is not one of `all`, `packed`, `unpacked`.
    #[error("Unknown filter mode: '{0}'. Valid options: all, packed, unpacked")]
    UnknownFilterMode(String),

    /// Image file type cannot be mapped to an image content type.
    ///
    /// ## When This Occurs
    /// - File extension is missing (`IMG_0001`)
    /// - File is not an image (`notes.txt`)
    #[error("Unsupported image type: {0}")]
    UnsupportedImageType(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any backend call; the collection is never touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Image upload exceeds the size bound.
    #[error("Image must be smaller than {max_bytes} bytes (got {actual_bytes})")]
    ImageTooLarge { max_bytes: usize, actual_bytes: usize },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn too_long(field: &str, max: usize) -> Self {
        ValidationError::TooLong {
            field: field.to_string(),
            max,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("name").to_string(), "name is required");
        assert_eq!(
            ValidationError::too_long("category", 50).to_string(),
            "category must be at most 50 characters"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("imageUrl").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_unknown_filter_mode_message() {
        let err = CoreError::UnknownFilterMode("done".to_string());
        assert!(err.to_string().contains("'done'"));
    }
}
