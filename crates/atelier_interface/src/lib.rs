//! Trait definitions for the Atelier generation pipeline.
//!
//! This crate defines the seams between the orchestrator and its
//! collaborators: generation backends, the embedding model, the similarity
//! index, the relational store, and the best-effort post-processing sinks.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{
    CodeGenerator, EmbeddingBackend, EmbeddingSink, GenerationStore, SimilarityIndex, Streaming,
    UsageLedger,
};
pub use types::{EmbeddingMode, FinishReason, GenerationMatch, PatternMatch, StreamChunk};
