//! Image attachment types for multimodal generation requests.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Maximum attachment size in bytes (5 MB).
pub(crate) const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// MIME types accepted for image attachments.
pub(crate) const SUPPORTED_IMAGE_MIMES: &[&str] =
    &["image/png", "image/jpeg", "image/webp", "image/gif"];

/// An image attached to a generation request (e.g., a design mockup the
/// generated component should match).
///
/// The data is carried base64-encoded, ready for provider payloads.
///
/// # Examples
///
/// ```
/// use atelier_core::ImageAttachment;
///
/// let image = ImageAttachment {
///     mime: "image/png".to_string(),
///     data: "iVBORw0KGgo...".to_string(),
/// };
/// assert_eq!(image.mime, "image/png");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// MIME type, e.g. "image/png"
    pub mime: String,
    /// Base64-encoded image data
    pub data: String,
}

impl ImageAttachment {
    /// Encode raw image bytes into an attachment.
    pub fn from_bytes(mime: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime: mime.into(),
            data: STANDARD.encode(bytes),
        }
    }

    /// Approximate decoded size in bytes of the base64 payload.
    pub fn decoded_len(&self) -> usize {
        // 4 base64 chars encode 3 bytes; padding overestimates by at most 2.
        self.data.len() / 4 * 3
    }

    /// Whether the MIME type is in the supported set.
    pub fn mime_supported(&self) -> bool {
        SUPPORTED_IMAGE_MIMES.contains(&self.mime.as_str())
    }
}
