//! Provider router and stream orchestrator for Atelier.
//!
//! The orchestrator drives one generation request through its full
//! lifecycle: validation, record creation, context enrichment, streaming
//! backend invocation, quality gating, record finalization, and detached
//! post-processing. Events are forwarded to the caller as they happen and
//! the stream always terminates with exactly one `complete` or `error`
//! event.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod orchestrator;
mod settings;
mod sse;

pub use orchestrator::{EventStream, Orchestrator};
pub use settings::{EnrichmentSettings, OrchestratorSettings, ProviderSettings};
pub use sse::sse_frame;
