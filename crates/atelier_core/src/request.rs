//! Inbound generation request types.

use crate::attachment::{MAX_IMAGE_BYTES, SUPPORTED_IMAGE_MIMES};
use crate::{ComponentLibrary, Framework, ImageAttachment, VisualStyle};
use atelier_error::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum prompt length in characters.
pub const MIN_PROMPT_CHARS: usize = 10;

/// Maximum prompt length in characters.
pub const MAX_PROMPT_CHARS: usize = 2000;

/// A user's request to generate a UI component.
///
/// Deserialized from the web layer's JSON body. [`GenerationRequest::validate`]
/// must pass before any record is created or backend is contacted.
///
/// # Examples
///
/// ```
/// use atelier_core::{Framework, GenerationRequest};
///
/// let request: GenerationRequest = serde_json::from_str(
///     r#"{"prompt": "Create a modern button component with hover effects",
///         "framework": "react"}"#,
/// )
/// .unwrap();
/// assert_eq!(request.framework, Framework::React);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Natural-language description of the component to generate
    #[serde(alias = "description")]
    pub prompt: String,
    /// Target framework
    pub framework: Framework,
    /// Component library preference
    #[serde(default)]
    pub component_library: ComponentLibrary,
    /// Visual style preference
    #[serde(default)]
    pub style: VisualStyle,
    /// Whether to generate type-safe code (TypeScript)
    #[serde(default = "default_true")]
    pub typescript: bool,
    /// Caller-supplied credential overriding the platform default (BYOK)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Whether to enrich the prompt with retrieved context
    #[serde(default = "default_true")]
    pub use_context: bool,
    /// Optional image attachment (design mockup)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageAttachment>,
    /// Prior generation this request refines, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_generation_id: Option<Uuid>,
}

fn default_true() -> bool {
    true
}

impl GenerationRequest {
    /// Validate request shape and bounds.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when:
    /// - the prompt is shorter than [`MIN_PROMPT_CHARS`] or longer than
    ///   [`MAX_PROMPT_CHARS`]
    /// - an attached image exceeds 5 MB or carries an unsupported MIME type
    pub fn validate(&self) -> Result<(), ValidationError> {
        let prompt_chars = self.prompt.chars().count();
        if prompt_chars < MIN_PROMPT_CHARS {
            return Err(ValidationError::new(format!(
                "Prompt must be at least {} characters, got {}",
                MIN_PROMPT_CHARS, prompt_chars
            )));
        }
        if prompt_chars > MAX_PROMPT_CHARS {
            return Err(ValidationError::new(format!(
                "Prompt must be at most {} characters, got {}",
                MAX_PROMPT_CHARS, prompt_chars
            )));
        }

        if let Some(image) = &self.image {
            if !image.mime_supported() {
                return Err(ValidationError::new(format!(
                    "Unsupported image type '{}' (expected one of {})",
                    image.mime,
                    SUPPORTED_IMAGE_MIMES.join(", ")
                )));
            }
            if image.decoded_len() > MAX_IMAGE_BYTES {
                return Err(ValidationError::new(format!(
                    "Image exceeds the {} MB attachment limit",
                    MAX_IMAGE_BYTES / (1024 * 1024)
                )));
            }
        }

        Ok(())
    }
}
