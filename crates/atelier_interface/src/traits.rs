//! Trait definitions for generation backends and pipeline collaborators.

use crate::{EmbeddingMode, GenerationMatch, PatternMatch, StreamChunk};
use async_trait::async_trait;
use atelier_core::{BackendRequest, GenerationRecord, GenerationUpdate, NewGeneration};
use atelier_error::AtelierResult;
use futures_util::stream::Stream;
use std::pin::Pin;
use uuid::Uuid;

/// Core trait that all code-generation backends must implement.
///
/// This provides the minimal interface for one-shot generation. Streaming
/// backends additionally implement [`Streaming`].
#[async_trait]
pub trait CodeGenerator: Send + Sync {
    /// Generate component code for the given backend request.
    async fn generate(&self, req: &BackendRequest) -> AtelierResult<String>;

    /// Provider name (e.g., "anthropic", "gateway").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "claude-sonnet-4-20250514").
    fn model_name(&self) -> &str;
}

/// Trait for backends that support streaming responses.
#[async_trait]
pub trait Streaming: CodeGenerator {
    /// Generate a streaming response.
    ///
    /// Returns a stream that yields chunks as they arrive from the backend.
    async fn generate_stream(
        &self,
        req: &BackendRequest,
    ) -> AtelierResult<Pin<Box<dyn Stream<Item = AtelierResult<StreamChunk>> + Send>>>;
}

/// Trait for the embedding model client.
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    /// Convert text to a fixed-length vector.
    ///
    /// `api_key` overrides the platform-default credential for this call
    /// (bring-your-own-key); a configuration error is returned when neither
    /// is available.
    async fn embed(
        &self,
        text: &str,
        mode: EmbeddingMode,
        api_key: Option<&str>,
    ) -> AtelierResult<Vec<f32>>;

    /// Dimensionality of the embedding vectors.
    fn dimensions(&self) -> usize;
}

/// Narrow interface over the external similarity-search store.
#[async_trait]
pub trait SimilarityIndex: Send + Sync {
    /// Retrieve prior generations similar to the query vector.
    ///
    /// Only generations with quality score ≥ `min_quality` and similarity
    /// ≥ `threshold` are returned, at most `limit` of them.
    async fn match_generations(
        &self,
        embedding: &[f32],
        threshold: f32,
        limit: usize,
        min_quality: f32,
    ) -> AtelierResult<Vec<GenerationMatch>>;

    /// Retrieve reusable patterns similar to the query vector.
    async fn match_patterns(
        &self,
        embedding: &[f32],
        threshold: f32,
        limit: usize,
    ) -> AtelierResult<Vec<PatternMatch>>;
}

/// Narrow interface over the external relational store.
///
/// The pipeline never issues arbitrary queries: records are inserted once,
/// finalized once, and read back only by id.
#[async_trait]
pub trait GenerationStore: Send + Sync {
    /// Insert a new generation record, returning its id.
    async fn insert_generation(&self, generation: NewGeneration) -> AtelierResult<Uuid>;

    /// Apply a finalizing update to an existing record.
    async fn update_generation(&self, id: Uuid, update: GenerationUpdate) -> AtelierResult<()>;

    /// Fetch a record by id.
    async fn get_generation(&self, id: Uuid) -> AtelierResult<Option<GenerationRecord>>;
}

/// Sink for fire-and-forget prompt-embedding storage.
#[async_trait]
pub trait EmbeddingSink: Send + Sync {
    /// Store the prompt embedding for a completed generation.
    async fn store_prompt_embedding(
        &self,
        generation_id: Uuid,
        embedding: &[f32],
    ) -> AtelierResult<()>;
}

/// Ledger for fire-and-forget usage accounting.
#[async_trait]
pub trait UsageLedger: Send + Sync {
    /// Record one completed generation for the user.
    async fn record_generation(&self, user_id: Uuid) -> AtelierResult<()>;
}
