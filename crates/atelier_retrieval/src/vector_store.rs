//! Vector-store RPC client.

use async_trait::async_trait;
use atelier_error::{AtelierResult, ConfigError, RetrievalError, RetrievalErrorKind};
use atelier_interface::{EmbeddingSink, GenerationMatch, PatternMatch, SimilarityIndex};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::env;
use tracing::{debug, error, instrument};
use uuid::Uuid;

/// Client for the external vector-capable store.
///
/// Similarity search goes through two stored procedures
/// (`match_generations`, `match_patterns`) exposed over a PostgREST-style
/// RPC surface; prompt embeddings are upserted into
/// `generation_embeddings`. This subsystem never issues arbitrary queries
/// against the store.
#[derive(Debug, Clone)]
pub struct VectorStoreClient {
    client: Client,
    base_url: String,
    service_key: String,
}

impl VectorStoreClient {
    /// Create a client from `VECTOR_STORE_URL` and `VECTOR_STORE_KEY`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when either variable is absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("VECTOR_STORE_URL")
            .map_err(|_| ConfigError::new("VECTOR_STORE_URL not set"))?;
        let service_key = env::var("VECTOR_STORE_KEY")
            .map_err(|_| ConfigError::new("VECTOR_STORE_KEY not set"))?;
        Ok(Self::new(base_url, service_key))
    }

    /// Create a client with explicit endpoint and service key.
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.into(),
        }
    }

    async fn rpc<T: DeserializeOwned>(
        &self,
        function: &str,
        body: serde_json::Value,
    ) -> AtelierResult<T> {
        let url = format!("{}/rest/v1/rpc/{}", self.base_url, function);
        debug!(function, "Calling vector store RPC");

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, function, "Vector store request failed");
                RetrievalError::new(RetrievalErrorKind::Search(format!("{}: {}", function, e)))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, function, "Vector store returned error");
            return Err(RetrievalError::new(RetrievalErrorKind::Search(format!(
                "{} failed with {}: {}",
                function, status, body
            )))
            .into());
        }

        response.json().await.map_err(|e| {
            error!(error = ?e, function, "Failed to parse vector store response");
            RetrievalError::new(RetrievalErrorKind::Search(format!(
                "{} returned malformed rows: {}",
                function, e
            )))
            .into()
        })
    }
}

#[async_trait]
impl SimilarityIndex for VectorStoreClient {
    #[instrument(skip(self, embedding))]
    async fn match_generations(
        &self,
        embedding: &[f32],
        threshold: f32,
        limit: usize,
        min_quality: f32,
    ) -> AtelierResult<Vec<GenerationMatch>> {
        self.rpc(
            "match_generations",
            json!({
                "query_embedding": embedding,
                "match_threshold": threshold,
                "match_count": limit,
                "min_quality": min_quality,
            }),
        )
        .await
    }

    #[instrument(skip(self, embedding))]
    async fn match_patterns(
        &self,
        embedding: &[f32],
        threshold: f32,
        limit: usize,
    ) -> AtelierResult<Vec<PatternMatch>> {
        self.rpc(
            "match_patterns",
            json!({
                "query_embedding": embedding,
                "match_threshold": threshold,
                "match_count": limit,
            }),
        )
        .await
    }
}

#[async_trait]
impl EmbeddingSink for VectorStoreClient {
    #[instrument(skip(self, embedding))]
    async fn store_prompt_embedding(
        &self,
        generation_id: Uuid,
        embedding: &[f32],
    ) -> AtelierResult<()> {
        let url = format!("{}/rest/v1/generation_embeddings", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("Prefer", "resolution=merge-duplicates")
            .json(&json!([{
                "generation_id": generation_id,
                "embedding": embedding,
            }]))
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Embedding upsert request failed");
                RetrievalError::new(RetrievalErrorKind::Storage(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Embedding upsert returned error");
            return Err(RetrievalError::new(RetrievalErrorKind::Storage(format!(
                "upsert failed with {}: {}",
                status, body
            )))
            .into());
        }

        debug!(%generation_id, "Stored prompt embedding");
        Ok(())
    }
}
