//! # Image Uploads
//!
//! The photo attached to a new record, as handed over by the shell.
//!
//! ```text
//!  file bytes + extension
//!         │
//!         ▼
//!  ImageUpload::new ── size > 5 MiB? ──► ValidationError::ImageTooLarge
//!         │
//!         ├──► to_data_uri()          (embedded backend, stored inline)
//!         └──► bytes + content_type   (remote backend, uploaded as a blob)
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{CoreError, CoreResult};
use crate::validation::validate_image_size;

/// Raw image bytes plus their content type.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    bytes: Vec<u8>,
    content_type: &'static str,
    extension: String,
}

impl ImageUpload {
    /// Wraps image bytes, enforcing the size bound and a known image type.
    ///
    /// ## Example
    /// ```rust
    /// use fotogear_core::ImageUpload;
    ///
    /// let upload = ImageUpload::new(vec![0xFF, 0xD8, 0xFF], "JPG").unwrap();
    /// assert_eq!(upload.content_type(), "image/jpeg");
    /// assert_eq!(upload.extension(), "jpg");
    /// ```
    pub fn new(bytes: Vec<u8>, extension: &str) -> CoreResult<Self> {
        validate_image_size(bytes.len())?;

        let extension = extension.trim().trim_start_matches('.').to_lowercase();
        let content_type = content_type_for(&extension)
            .ok_or_else(|| CoreError::UnsupportedImageType(extension.clone()))?;

        Ok(ImageUpload {
            bytes,
            content_type,
            extension,
        })
    }

    /// Builds an upload from a file name such as `r5-front.png`.
    pub fn from_file_name(file_name: &str, bytes: Vec<u8>) -> CoreResult<Self> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .ok_or_else(|| CoreError::UnsupportedImageType(file_name.to_string()))?;

        Self::new(bytes, extension)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    /// Lowercase extension without the dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Encodes the image as an inline `data:` URI.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.bytes))
    }
}

// Debug output never includes the payload.
impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("content_type", &self.content_type)
            .field("extension", &self.extension)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn content_type_for(extension: &str) -> Option<&'static str> {
    match extension {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}
