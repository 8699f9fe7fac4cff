//! Core type definitions for the Atelier interface.

use atelier_core::Framework;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single chunk from a streaming generation backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamChunk {
    /// Incremental content (partial generated text).
    pub content: String,
    /// Whether this is the final chunk.
    pub is_final: bool,
    /// Optional finish reason if final.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
}

impl StreamChunk {
    /// A non-final chunk carrying partial text.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_final: false,
            finish_reason: None,
        }
    }

    /// The final chunk, optionally carrying trailing text.
    pub fn done(content: impl Into<String>, finish_reason: FinishReason) -> Self {
        Self {
            content: content.into(),
            is_final: true,
            finish_reason: Some(finish_reason),
        }
    }
}

/// Why generation stopped.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
pub enum FinishReason {
    /// Model completed naturally.
    Stop,
    /// Hit a token limit.
    Length,
    /// Content was filtered.
    ContentFilter,
    /// Other/unknown reason.
    Other,
}

/// How text is encoded into an embedding vector.
///
/// Query-oriented encoding weights the text for retrieval lookups;
/// document-oriented encoding weights it for indexing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum EmbeddingMode {
    /// Encode for retrieval queries.
    Query,
    /// Encode for document indexing.
    Document,
}

/// A similarity match against a prior generation.
///
/// Ephemeral: computed per request and rendered into the prompt context,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationMatch {
    /// Identity of the matched generation record
    pub generation_id: Uuid,
    /// Similarity score in [0, 1]
    pub similarity: f32,
    /// The matched generation's prompt
    pub prompt: String,
    /// The matched generation's code
    pub code: String,
    /// The matched generation's quality score
    pub quality_score: f32,
    /// The matched generation's framework
    pub framework: Framework,
}

/// A similarity match against a reusable design pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMatch {
    /// Identity of the matched pattern
    pub pattern_id: Uuid,
    /// Similarity score in [0, 1]
    pub similarity: f32,
    /// Pattern name
    pub name: String,
    /// Pattern category (e.g. "navigation", "forms")
    pub category: String,
    /// Pattern description
    pub description: String,
    /// Pattern code
    pub code: String,
    /// Framework the pattern targets, if framework-specific
    pub framework: Option<Framework>,
}
