//! Embedding model client.

use async_trait::async_trait;
use atelier_error::{AtelierResult, ConfigError, RetrievalError, RetrievalErrorKind};
use atelier_interface::{EmbeddingBackend, EmbeddingMode};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::env;
use tracing::{debug, error, instrument};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "text-embedding-004";
const EMBEDDING_DIMENSIONS: usize = 768;

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: EmbeddingValues,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

/// Client for the text-embedding REST API.
///
/// Converts text to a fixed-length vector in one of two task modes:
/// query-oriented (retrieval lookups) or document-oriented (indexing).
/// The platform-default credential comes from `EMBEDDING_API_KEY`; callers
/// may override it per request (bring-your-own-key).
#[derive(Debug, Clone)]
pub struct EmbeddingClient {
    client: Client,
    base_url: String,
    model: String,
    default_api_key: Option<String>,
}

impl EmbeddingClient {
    /// Create a client using the `EMBEDDING_API_KEY` environment variable as
    /// the platform-default credential.
    ///
    /// Construction never fails: the credential is resolved per call so that
    /// BYOK requests work on hosts with no platform key at all.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            default_api_key: env::var("EMBEDDING_API_KEY").ok(),
        }
    }

    /// Create a client with an explicit platform credential and model.
    pub fn with_credentials(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            default_api_key: Some(api_key.into()),
        }
    }

    /// Override the API base URL (for self-hosted or proxy deployments).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn resolve_key<'a>(&'a self, override_key: Option<&'a str>) -> Result<&'a str, ConfigError> {
        override_key
            .or(self.default_api_key.as_deref())
            .ok_or_else(|| {
                ConfigError::new(
                    "No embedding credential available: set EMBEDDING_API_KEY or supply an API key",
                )
            })
    }

    fn task_type(mode: EmbeddingMode) -> &'static str {
        match mode {
            EmbeddingMode::Query => "RETRIEVAL_QUERY",
            EmbeddingMode::Document => "RETRIEVAL_DOCUMENT",
        }
    }
}

impl Default for EmbeddingClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingBackend for EmbeddingClient {
    #[instrument(skip(self, text, api_key), fields(model = %self.model, text_len = text.len()))]
    async fn embed(
        &self,
        text: &str,
        mode: EmbeddingMode,
        api_key: Option<&str>,
    ) -> AtelierResult<Vec<f32>> {
        let key = self.resolve_key(api_key)?;

        let url = format!("{}/models/{}:embedContent", self.base_url, self.model);
        let body = json!({
            "model": format!("models/{}", self.model),
            "content": { "parts": [{ "text": text }] },
            "taskType": Self::task_type(mode),
        });

        debug!(task_type = Self::task_type(mode), "Requesting embedding");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Embedding request failed");
                RetrievalError::new(RetrievalErrorKind::Embedding(format!(
                    "Request failed: {}",
                    e
                )))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Embedding API returned error");
            return Err(RetrievalError::new(RetrievalErrorKind::Embedding(format!(
                "API error {}: {}",
                status, body
            )))
            .into());
        }

        let parsed: EmbedContentResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse embedding response");
            RetrievalError::new(RetrievalErrorKind::Embedding(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        debug!(
            dimensions = parsed.embedding.values.len(),
            "Received embedding"
        );
        Ok(parsed.embedding.values)
    }

    fn dimensions(&self) -> usize {
        EMBEDDING_DIMENSIONS
    }
}
