//! Atelier - AI-assisted UI-component generation pipeline.
//!
//! Atelier turns a natural-language description plus structural preferences
//! into generated component source code, streamed incrementally and
//! annotated with an automated quality verdict.
//!
//! # Features
//!
//! - **Context enrichment**: retrieval-augmented prompts built from prior
//!   generations and reusable design patterns via vector similarity search
//! - **Pluggable backends**: a direct provider client (Anthropic Messages
//!   API) or a remote tool-invocation gateway, both streaming
//! - **Quality gates**: five static checks (security, lint, type-check,
//!   accessibility, responsive) with a weighted aggregate score
//! - **Lifecycle management**: generation records move
//!   `processing → completed|failed` with best-effort post-processing
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use atelier::{
//!     AnthropicClient, GenerationRequest, Orchestrator, OrchestratorSettings, PostgresStore,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     atelier::init_observability(Default::default());
//!
//!     let settings = OrchestratorSettings::load()?;
//!     let backend =
//!         Arc::new(AnthropicClient::new().with_model(&settings.provider.default_model));
//!     let store = Arc::new(PostgresStore::from_env()?);
//!
//!     let orchestrator = Orchestrator::new(backend, store)
//!         .with_enrichment_defaults(settings.enrichment.to_options());
//!
//!     let request: GenerationRequest = serde_json::from_str(
//!         r#"{"prompt": "Create a modern button component", "framework": "react"}"#,
//!     )?;
//!     let mut events = orchestrator.generate(uuid::Uuid::new_v4(), request).await?;
//!     // Forward events to the client...
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Atelier is organized as a workspace with focused crates:
//!
//! - `atelier_core` - Core data types (requests, records, events)
//! - `atelier_interface` - Trait seams between pipeline stages
//! - `atelier_error` - Error types
//! - `atelier_quality` - Static quality-gate engine
//! - `atelier_retrieval` - Embedding client and context enrichment
//! - `atelier_gateway` - JSON-RPC tool-invocation gateway client
//! - `atelier_models` - Direct LLM provider backends
//! - `atelier_database` - PostgreSQL persistence
//! - `atelier_orchestrator` - Provider routing and stream orchestration
//!
//! This crate (`atelier`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod observability;

pub use observability::{ObservabilityConfig, init_observability};

// Re-export core crates (always available)
pub use atelier_core::*;
pub use atelier_error::*;
pub use atelier_gateway::{GatewayClient, ToolInfo, design_system};
pub use atelier_interface::*;
pub use atelier_models::{AnthropicClient, build_system_prompt, build_user_text};
pub use atelier_orchestrator::{
    EnrichmentSettings, Orchestrator, OrchestratorSettings, ProviderSettings, sse_frame,
};
pub use atelier_quality::{
    QualityGate, QualityGateResult, QualityReport, Severity, calculate_quality_score,
    run_all_gates, run_gate,
};
pub use atelier_retrieval::{
    EmbeddingClient, Enricher, EnrichmentOptions, EnrichmentResult, EnrichmentService,
    VectorStoreClient, render_context_block,
};

// Database integration (optional)
#[cfg(feature = "database")]
pub use atelier_database::{
    GenerationRepository, PostgresGenerationRepository, PostgresStore, establish_connection,
};
