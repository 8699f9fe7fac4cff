//! Backend-facing generation request.

use crate::{ComponentLibrary, Framework, GenerationRequest, ImageAttachment, VisualStyle};
use serde::{Deserialize, Serialize};

/// The request handed to a generation backend after enrichment.
///
/// Carries the user's prompt plus structural preferences and the optional
/// retrieved-context addition. Backends render these into their own wire
/// format (provider message payloads or gateway tool arguments).
///
/// # Examples
///
/// ```
/// use atelier_core::{BackendRequest, Framework, GenerationRequest};
///
/// let request: GenerationRequest = serde_json::from_str(
///     r#"{"prompt": "Create a modern button component", "framework": "react"}"#,
/// )
/// .unwrap();
/// let backend = BackendRequest::from_request(&request, Some("prior exemplars".into()));
/// assert_eq!(backend.framework, Framework::React);
/// assert!(backend.context_addition.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendRequest {
    /// The user's prompt text
    pub prompt: String,
    /// Retrieved context block to append, if enrichment produced one
    pub context_addition: Option<String>,
    /// Target framework
    pub framework: Framework,
    /// Component library preference
    pub component_library: ComponentLibrary,
    /// Visual style preference
    pub style: VisualStyle,
    /// Whether to generate TypeScript
    pub typescript: bool,
    /// Caller-supplied credential override (BYOK)
    pub api_key: Option<String>,
    /// Optional image attachment
    pub image: Option<ImageAttachment>,
}

impl BackendRequest {
    /// Build a backend request from a validated generation request and an
    /// optional enrichment context block (empty blocks are dropped).
    pub fn from_request(request: &GenerationRequest, context_addition: Option<String>) -> Self {
        Self {
            prompt: request.prompt.clone(),
            context_addition: context_addition.filter(|c| !c.is_empty()),
            framework: request.framework,
            component_library: request.component_library,
            style: request.style,
            typescript: request.typescript,
            api_key: request.api_key.clone(),
            image: request.image.clone(),
        }
    }

    /// The prompt with the context addition appended, for backends that take
    /// a single task string.
    pub fn task_text(&self) -> String {
        match &self.context_addition {
            Some(context) => format!("{}\n\n{}", self.prompt, context),
            None => self.prompt.clone(),
        }
    }
}
