//! Retrieval-augmented context enrichment for the Atelier pipeline.
//!
//! This crate provides the embedding model client, the vector-store RPC
//! client, and the enrichment service that turns similarity matches into a
//! textual context block for the generation backend.
//!
//! Enrichment is strictly best-effort: any internal failure degrades to an
//! empty context block rather than aborting generation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod embedding;
mod enrichment;
mod vector_store;

pub use context::{MAX_EXCERPT_CHARS, render_context_block, truncate_excerpt};
pub use embedding::EmbeddingClient;
pub use enrichment::{Enricher, EnrichmentOptions, EnrichmentResult, EnrichmentService};
pub use vector_store::VectorStoreClient;
