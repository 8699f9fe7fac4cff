//! Component generation through the gateway's specialist tool.

use crate::GatewayClient;
use async_stream::stream;
use async_trait::async_trait;
use atelier_core::{BackendRequest, ComponentLibrary};
use atelier_error::{AtelierResult, GatewayError, GatewayErrorKind};
use atelier_interface::{CodeGenerator, FinishReason, StreamChunk, Streaming};
use futures_util::stream::Stream;
use serde_json::{Value, json};
use std::pin::Pin;
use tracing::{debug, instrument};

/// Fixed tool name for UI generation on the gateway.
const SPECIALIST_TOOL: &str = "execute_specialist_task";

/// Fixed task category for UI generation.
const TASK_CATEGORY: &str = "ui_generation";

/// Map a component-library preference to the gateway's design-system
/// identifier.
///
/// `none` defaults to the platform's baseline styling so the gateway always
/// receives a concrete design system.
///
/// # Examples
///
/// ```
/// use atelier_core::ComponentLibrary;
/// use atelier_gateway::design_system;
///
/// assert_eq!(design_system(ComponentLibrary::Mui), "material_design");
/// assert_eq!(design_system(ComponentLibrary::Chakra), "chakra_ui");
/// ```
pub fn design_system(library: ComponentLibrary) -> &'static str {
    match library {
        ComponentLibrary::Tailwind => "tailwind_ui",
        ComponentLibrary::Mui => "material_design",
        ComponentLibrary::Chakra => "chakra_ui",
        ComponentLibrary::Shadcn => "shadcn_ui",
        ComponentLibrary::None => "tailwind_ui",
    }
}

fn user_preferences(req: &BackendRequest) -> AtelierResult<String> {
    let preferences = json!({
        "design_system": design_system(req.component_library),
        "framework": req.framework.as_str(),
    });
    serde_json::to_string(&preferences).map_err(|e| {
        GatewayError::new(GatewayErrorKind::Serialization(e.to_string())).into()
    })
}

/// Extract the concatenated text content blocks from a tool result.
///
/// Fails when the result carries no text-typed content at all.
fn extract_text_content(result: &Value) -> Result<String, GatewayError> {
    let blocks = result
        .get("content")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let text: String = blocks
        .iter()
        .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
        .filter_map(|block| block.get("text").and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join("");

    if text.is_empty() {
        return Err(GatewayError::new(GatewayErrorKind::NoTextContent));
    }
    Ok(text)
}

impl GatewayClient {
    /// Generate component code through the specialist tool.
    ///
    /// The task text is the prompt with the enrichment context appended when
    /// present; structural preferences travel as a serialized
    /// `user_preferences` object.
    #[instrument(skip(self, req), fields(framework = req.framework.as_str()))]
    pub async fn generate_component(&self, req: &BackendRequest) -> AtelierResult<String> {
        let arguments = json!({
            "task": req.task_text(),
            "category": TASK_CATEGORY,
            "user_preferences": user_preferences(req)?,
        });

        let result = self.call_tool(SPECIALIST_TOOL, arguments).await?;
        let code = extract_text_content(&result)?;
        debug!(code_len = code.len(), "Gateway produced component code");
        Ok(code)
    }
}

#[async_trait]
impl CodeGenerator for GatewayClient {
    async fn generate(&self, req: &BackendRequest) -> AtelierResult<String> {
        self.generate_component(req).await
    }

    fn provider_name(&self) -> &'static str {
        "gateway"
    }

    fn model_name(&self) -> &str {
        SPECIALIST_TOOL
    }
}

#[async_trait]
impl Streaming for GatewayClient {
    /// The gateway protocol returns the full artifact in one response, so
    /// the stream carries a single final chunk.
    async fn generate_stream(
        &self,
        req: &BackendRequest,
    ) -> AtelierResult<Pin<Box<dyn Stream<Item = AtelierResult<StreamChunk>> + Send>>> {
        let client = self.clone();
        let req = req.clone();
        Ok(Box::pin(stream! {
            match client.generate_component(&req).await {
                Ok(code) => yield Ok(StreamChunk::done(code, FinishReason::Stop)),
                Err(e) => yield Err(e),
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::{Framework, GenerationRequest};

    fn backend_request(library: ComponentLibrary) -> BackendRequest {
        let request = GenerationRequest {
            prompt: "Create a modern button component".to_string(),
            framework: Framework::React,
            component_library: library,
            style: Default::default(),
            typescript: true,
            api_key: None,
            use_context: true,
            image: None,
            parent_generation_id: None,
        };
        BackendRequest::from_request(&request, None)
    }

    #[test]
    fn mui_maps_to_material_design() {
        let prefs = user_preferences(&backend_request(ComponentLibrary::Mui)).unwrap();
        let decoded: Value = serde_json::from_str(&prefs).unwrap();
        assert_eq!(decoded["design_system"], "material_design");
        assert_eq!(decoded["framework"], "react");
    }

    #[test]
    fn chakra_maps_to_chakra_ui() {
        let prefs = user_preferences(&backend_request(ComponentLibrary::Chakra)).unwrap();
        let decoded: Value = serde_json::from_str(&prefs).unwrap();
        assert_eq!(decoded["design_system"], "chakra_ui");
    }

    #[test]
    fn none_defaults_to_tailwind_baseline() {
        assert_eq!(design_system(ComponentLibrary::None), "tailwind_ui");
        assert_eq!(design_system(ComponentLibrary::Tailwind), "tailwind_ui");
    }

    #[test]
    fn text_blocks_are_concatenated() {
        let result = json!({
            "content": [
                {"type": "text", "text": "const Button"},
                {"type": "image", "data": "..."},
                {"type": "text", "text": " = () => null;"},
            ]
        });
        assert_eq!(
            extract_text_content(&result).unwrap(),
            "const Button = () => null;"
        );
    }

    #[test]
    fn missing_text_content_fails() {
        let result = json!({"content": [{"type": "image", "data": "..."}]});
        let err = extract_text_content(&result).unwrap_err();
        assert!(format!("{}", err).contains("no text content"));

        let empty = json!({});
        assert!(extract_text_content(&empty).is_err());
    }

    #[test]
    fn task_text_includes_context_addition() {
        let request = GenerationRequest {
            prompt: "Create a modern button component".to_string(),
            framework: Framework::React,
            component_library: ComponentLibrary::Tailwind,
            style: Default::default(),
            typescript: true,
            api_key: None,
            use_context: true,
            image: None,
            parent_generation_id: None,
        };
        let req = BackendRequest::from_request(&request, Some("Use these exemplars".to_string()));
        assert!(req.task_text().contains("Create a modern button component"));
        assert!(req.task_text().contains("Use these exemplars"));
    }
}
