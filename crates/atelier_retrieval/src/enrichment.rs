//! Context enrichment service.

use crate::context::render_context_block;
use async_trait::async_trait;
use atelier_core::Framework;
use atelier_error::AtelierResult;
use atelier_interface::{
    EmbeddingBackend, EmbeddingMode, GenerationMatch, PatternMatch, SimilarityIndex,
};
use tracing::{debug, instrument, warn};

/// Tuning knobs for one enrichment pass.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentOptions {
    /// Maximum prior generations to retrieve
    pub max_generations: usize,
    /// Maximum reusable patterns to retrieve
    pub max_patterns: usize,
    /// Minimum quality score for prior generations
    pub min_quality: f32,
    /// Minimum similarity for prior generations
    pub generation_threshold: f32,
    /// Minimum similarity for patterns
    pub pattern_threshold: f32,
    /// Post-filter both result sets to this framework
    pub framework: Option<Framework>,
    /// Caller-supplied embedding credential (BYOK)
    pub api_key: Option<String>,
}

impl Default for EnrichmentOptions {
    fn default() -> Self {
        Self {
            max_generations: 3,
            max_patterns: 2,
            min_quality: 0.7,
            generation_threshold: 0.7,
            pattern_threshold: 0.5,
            framework: None,
            api_key: None,
        }
    }
}

/// Outcome of one enrichment pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnrichmentResult {
    /// Matched prior generations, best first
    pub generations: Vec<GenerationMatch>,
    /// Matched reusable patterns, best first
    pub patterns: Vec<PatternMatch>,
    /// Rendered context block; empty when nothing matched
    pub context_block: String,
}

impl EnrichmentResult {
    /// The no-enrichment result (empty context block).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether enrichment actually produced context.
    pub fn occurred(&self) -> bool {
        !self.context_block.is_empty()
    }
}

/// Retrieves semantically similar prior work and renders it into a context
/// block for the generation backend.
///
/// The prompt is embedded in query mode, then the generation and pattern
/// searches run concurrently. An optional framework post-filter is applied
/// to both result sets before rendering.
#[derive(Debug, Clone)]
pub struct EnrichmentService<E, S> {
    embedder: E,
    index: S,
}

impl<E, S> EnrichmentService<E, S>
where
    E: EmbeddingBackend,
    S: SimilarityIndex,
{
    /// Create a service over an embedding backend and a similarity index.
    pub fn new(embedder: E, index: S) -> Self {
        Self { embedder, index }
    }

    /// Run one enrichment pass.
    ///
    /// # Errors
    ///
    /// Propagates embedding and search failures. Callers on the generation
    /// path should prefer [`EnrichmentService::enrich_or_default`], which
    /// degrades to an empty context instead.
    #[instrument(skip(self, prompt, options), fields(prompt_len = prompt.len()))]
    pub async fn enrich(
        &self,
        prompt: &str,
        options: &EnrichmentOptions,
    ) -> AtelierResult<EnrichmentResult> {
        let embedding = self
            .embedder
            .embed(prompt, EmbeddingMode::Query, options.api_key.as_deref())
            .await?;

        let (mut generations, mut patterns) = tokio::try_join!(
            self.index.match_generations(
                &embedding,
                options.generation_threshold,
                options.max_generations,
                options.min_quality,
            ),
            self.index
                .match_patterns(&embedding, options.pattern_threshold, options.max_patterns),
        )?;

        if let Some(framework) = options.framework {
            generations.retain(|m| m.framework == framework);
            patterns.retain(|p| p.framework.map_or(true, |f| f == framework));
        }

        debug!(
            generations = generations.len(),
            patterns = patterns.len(),
            "Retrieved similarity matches"
        );

        let context_block = render_context_block(&generations, &patterns);
        Ok(EnrichmentResult {
            generations,
            patterns,
            context_block,
        })
    }

    /// Run one enrichment pass, degrading to an empty context on any
    /// internal failure. This is the only entry point the generation path
    /// uses; enrichment is never allowed to abort a generation.
    pub async fn enrich_or_default(
        &self,
        prompt: &str,
        options: &EnrichmentOptions,
    ) -> EnrichmentResult {
        match self.enrich(prompt, options).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Enrichment failed; continuing without context");
                EnrichmentResult::empty()
            }
        }
    }
}

/// Object-safe enrichment seam for the orchestrator.
///
/// The single entry point already folds failures into the empty result, so
/// implementations can never abort a generation.
#[async_trait]
pub trait Enricher: Send + Sync {
    /// Enrich the prompt, degrading to an empty context on failure.
    async fn enrich_or_default(
        &self,
        prompt: &str,
        options: &EnrichmentOptions,
    ) -> EnrichmentResult;
}

#[async_trait]
impl<E, S> Enricher for EnrichmentService<E, S>
where
    E: EmbeddingBackend,
    S: SimilarityIndex,
{
    async fn enrich_or_default(
        &self,
        prompt: &str,
        options: &EnrichmentOptions,
    ) -> EnrichmentResult {
        EnrichmentService::enrich_or_default(self, prompt, options).await
    }
}
