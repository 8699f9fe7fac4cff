//! Anthropic Messages API client.

use super::dto::{ApiMessage, ContentBlock, ImageSource, MessagesRequest, MessagesResponse};
use super::sse::{StreamAction, decode_line};
use crate::prompt::{build_system_prompt, build_user_text};
use async_trait::async_trait;
use atelier_core::BackendRequest;
use atelier_error::{AtelierResult, BackendError, ConfigError};
use atelier_interface::{CodeGenerator, FinishReason, StreamChunk, Streaming};
use futures_util::StreamExt;
use futures_util::stream::Stream;
use reqwest::Client;
use std::env;
use std::pin::Pin;
use tracing::{debug, error, instrument};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Anthropic Messages API client used as the direct generation backend.
///
/// The platform-default credential comes from `ANTHROPIC_API_KEY`; requests
/// carrying their own key (BYOK) override it per call.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: Client,
    default_api_key: Option<String>,
    model: String,
}

impl AnthropicClient {
    /// Create a client using the `ANTHROPIC_API_KEY` environment variable as
    /// the platform-default credential and the default model.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            default_api_key: env::var("ANTHROPIC_API_KEY").ok(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create a client with an explicit platform credential.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            default_api_key: Some(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Override the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn resolve_key<'a>(&'a self, req: &'a BackendRequest) -> Result<&'a str, ConfigError> {
        req.api_key
            .as_deref()
            .or(self.default_api_key.as_deref())
            .ok_or_else(|| {
                ConfigError::new(
                    "No provider credential available: set ANTHROPIC_API_KEY or supply an API key",
                )
            })
    }

    fn convert_request(&self, req: &BackendRequest, stream: bool) -> MessagesRequest {
        let mut content = vec![ContentBlock::Text {
            text: build_user_text(req),
        }];
        if let Some(image) = &req.image {
            content.push(ContentBlock::Image {
                source: ImageSource {
                    source_type: "base64",
                    media_type: image.mime.clone(),
                    data: image.data.clone(),
                },
            });
        }

        MessagesRequest {
            model: self.model.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            system: Some(build_system_prompt(req)),
            messages: vec![ApiMessage {
                role: "user",
                content,
            }],
            temperature: None,
            stream,
        }
    }

    async fn send(&self, req: &BackendRequest, stream: bool) -> AtelierResult<reqwest::Response> {
        let api_key = self.resolve_key(req)?;
        let body = self.convert_request(req, stream);

        debug!(model = %self.model, stream, "Sending request to Anthropic API");

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to Anthropic API");
                BackendError::new(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Anthropic API returned error");
            return Err(BackendError::new(format!("API error {}: {}", status, body)).into());
        }

        Ok(response)
    }
}

impl Default for AnthropicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeGenerator for AnthropicClient {
    #[instrument(skip(self, req), fields(model = %self.model))]
    async fn generate(&self, req: &BackendRequest) -> AtelierResult<String> {
        let response = self.send(req, false).await?;

        let decoded: MessagesResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Anthropic response");
            BackendError::new(format!("Failed to parse response: {}", e))
        })?;

        let code: String = decoded
            .content
            .iter()
            .filter(|block| block.block_type == "text")
            .map(|block| block.text.as_str())
            .collect();

        if code.is_empty() {
            return Err(BackendError::new("Provider returned no text content").into());
        }
        Ok(code)
    }

    fn provider_name(&self) -> &'static str {
        "anthropic"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Streaming for AnthropicClient {
    #[instrument(skip(self, req), fields(model = %self.model))]
    async fn generate_stream(
        &self,
        req: &BackendRequest,
    ) -> AtelierResult<Pin<Box<dyn Stream<Item = AtelierResult<StreamChunk>> + Send>>> {
        let response = self.send(req, true).await?;
        let mut bytes = response.bytes_stream();

        Ok(Box::pin(async_stream::stream! {
            let mut buffer = String::new();
            let mut finish_reason = FinishReason::Stop;

            'outer: while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        yield Err(BackendError::new(format!("Stream transport error: {}", e)).into());
                        return;
                    }
                };
                buffer.push_str(&String::from_utf8_lossy(&chunk));

                while let Some(newline) = buffer.find('\n') {
                    let line = buffer[..newline].trim_end_matches('\r').to_string();
                    buffer.drain(..=newline);

                    match decode_line(&line) {
                        StreamAction::Text(text) => yield Ok(StreamChunk::text(text)),
                        StreamAction::StopReason(reason) => finish_reason = reason,
                        StreamAction::Done => {
                            yield Ok(StreamChunk::done("", finish_reason));
                            break 'outer;
                        }
                        StreamAction::Error(message) => {
                            yield Err(BackendError::new(message).into());
                            return;
                        }
                        StreamAction::Ignore => {}
                    }
                }
            }
        }))
    }
}
