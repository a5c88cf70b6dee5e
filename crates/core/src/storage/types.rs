use std::path::Path;

use uuid::Uuid;

/// Object key prefix under which customer images are stored.
pub const IMAGE_KEY_PREFIX: &str = "images/";

/// Object key of a customer's image.
///
/// Pattern: `images/<customer_id>`
pub fn image_key(customer_id: Uuid) -> String {
    format!("{IMAGE_KEY_PREFIX}{customer_id}")
}

/// An image submitted for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub content_type: String,
    /// Filename as supplied by the uploader.
    pub file_name: String,
    pub body: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        content_type: impl Into<String>,
        file_name: impl Into<String>,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            content_type: content_type.into(),
            file_name: file_name.into(),
            body: body.into(),
        }
    }

    /// Extension of the original filename including the leading dot, or an
    /// empty string when there is none (`"me.png"` -> `".png"`).
    pub fn extension(&self) -> String {
        Path::new(&self.file_name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default()
    }
}

/// What the object store reported for a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub key: String,
    pub e_tag: Option<String>,
    pub version_id: Option<String>,
}

/// An image read back from the object store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub customer_id: Uuid,
    pub content_type: Option<String>,
    pub original_name: Option<String>,
    pub extension: Option<String>,
    pub body: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_key() {
        let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap();
        assert_eq!(image_key(id), "images/550e8400-e29b-41d4-a716-446655440001");
    }

    #[test]
    fn test_extension_keeps_leading_dot() {
        let upload = ImageUpload::new("image/png", "avatar.png", vec![1, 2, 3]);
        assert_eq!(upload.extension(), ".png");
    }

    #[test]
    fn test_extension_uses_last_segment() {
        let upload = ImageUpload::new("application/gzip", "photos.tar.gz", Vec::new());
        assert_eq!(upload.extension(), ".gz");
    }

    #[test]
    fn test_extension_empty_without_dot() {
        let upload = ImageUpload::new("image/jpeg", "avatar", Vec::new());
        assert_eq!(upload.extension(), "");
    }
}
