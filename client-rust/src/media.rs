use crate::{CollectionError, CollectionResult};
use base64::{engine::general_purpose::STANDARD, Engine};

/// Largest image accepted for embedding, in bytes.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// MIME types accepted for embedding.
pub const SUPPORTED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// An image encoded into a data URL, ready to be stored in an article's
/// `image_embedded` or `gallery_embedded` fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    mime_type: String,
    data_url: String,
}

impl EmbeddedImage {
    /// Validate and encode raw image bytes.
    pub fn encode(mime_type: &str, bytes: &[u8]) -> CollectionResult<Self> {
        let mime_type = mime_type.trim().to_ascii_lowercase();
        if !SUPPORTED_IMAGE_TYPES.contains(&mime_type.as_str()) {
            return Err(CollectionError::InvalidInput(format!(
                "Unsupported image type '{mime_type}'. Use JPEG, PNG, GIF or WebP"
            )));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(CollectionError::InvalidInput(format!(
                "Image is {} bytes, the maximum is {MAX_IMAGE_BYTES}",
                bytes.len()
            )));
        }

        let data_url = format!("data:{mime_type};base64,{}", STANDARD.encode(bytes));
        Ok(Self {
            mime_type,
            data_url,
        })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    pub fn into_data_url(self) -> String {
        self.data_url
    }
}

impl From<EmbeddedImage> for String {
    fn from(image: EmbeddedImage) -> Self {
        image.data_url
    }
}
