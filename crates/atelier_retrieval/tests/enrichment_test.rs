//! Tests for the context enrichment service.
//!
//! These use in-memory stand-ins for the embedding backend and the
//! similarity index; no network access is required.

use async_trait::async_trait;
use atelier_core::Framework;
use atelier_error::{AtelierResult, RetrievalError, RetrievalErrorKind};
use atelier_interface::{
    EmbeddingBackend, EmbeddingMode, GenerationMatch, PatternMatch, SimilarityIndex,
};
use atelier_retrieval::{EnrichmentOptions, EnrichmentService};
use uuid::Uuid;

struct FixedEmbedder;

#[async_trait]
impl EmbeddingBackend for FixedEmbedder {
    async fn embed(
        &self,
        _text: &str,
        _mode: EmbeddingMode,
        _api_key: Option<&str>,
    ) -> AtelierResult<Vec<f32>> {
        Ok(vec![0.1; 768])
    }

    fn dimensions(&self) -> usize {
        768
    }
}

struct FailingEmbedder;

#[async_trait]
impl EmbeddingBackend for FailingEmbedder {
    async fn embed(
        &self,
        _text: &str,
        _mode: EmbeddingMode,
        _api_key: Option<&str>,
    ) -> AtelierResult<Vec<f32>> {
        Err(RetrievalError::new(RetrievalErrorKind::Embedding(
            "model offline".to_string(),
        ))
        .into())
    }

    fn dimensions(&self) -> usize {
        768
    }
}

#[derive(Default)]
struct FixedIndex {
    generations: Vec<GenerationMatch>,
    patterns: Vec<PatternMatch>,
}

#[async_trait]
impl SimilarityIndex for FixedIndex {
    async fn match_generations(
        &self,
        _embedding: &[f32],
        threshold: f32,
        limit: usize,
        min_quality: f32,
    ) -> AtelierResult<Vec<GenerationMatch>> {
        Ok(self
            .generations
            .iter()
            .filter(|m| m.similarity >= threshold && m.quality_score >= min_quality)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn match_patterns(
        &self,
        _embedding: &[f32],
        threshold: f32,
        limit: usize,
    ) -> AtelierResult<Vec<PatternMatch>> {
        Ok(self
            .patterns
            .iter()
            .filter(|p| p.similarity >= threshold)
            .take(limit)
            .cloned()
            .collect())
    }
}

fn generation(similarity: f32, quality: f32, framework: Framework) -> GenerationMatch {
    GenerationMatch {
        generation_id: Uuid::new_v4(),
        similarity,
        prompt: "Create a dashboard card".to_string(),
        code: "export const Card = () => <div>card</div>;".to_string(),
        quality_score: quality,
        framework,
    }
}

fn pattern(similarity: f32, framework: Option<Framework>) -> PatternMatch {
    PatternMatch {
        pattern_id: Uuid::new_v4(),
        similarity,
        name: "Stat tile".to_string(),
        category: "data-display".to_string(),
        description: "Compact metric display".to_string(),
        code: "<div>stat</div>".to_string(),
        framework,
    }
}

#[tokio::test]
async fn zero_matches_yield_empty_context_without_error() {
    let service = EnrichmentService::new(FixedEmbedder, FixedIndex::default());

    let result = service
        .enrich("Create a modern button", &EnrichmentOptions::default())
        .await
        .expect("enrichment should succeed");

    assert!(result.generations.is_empty());
    assert!(result.patterns.is_empty());
    assert_eq!(result.context_block, "");
    assert!(!result.occurred());
}

#[tokio::test]
async fn matches_render_into_context_block() {
    let index = FixedIndex {
        generations: vec![generation(0.9, 0.85, Framework::React)],
        patterns: vec![pattern(0.6, None)],
    };
    let service = EnrichmentService::new(FixedEmbedder, index);

    let result = service
        .enrich("Create a dashboard card", &EnrichmentOptions::default())
        .await
        .unwrap();

    assert_eq!(result.generations.len(), 1);
    assert_eq!(result.patterns.len(), 1);
    assert!(result.occurred());
    assert!(result.context_block.contains("Create a dashboard card"));
    assert!(result.context_block.contains("Stat tile"));
}

#[tokio::test]
async fn thresholds_filter_low_similarity_and_quality() {
    let index = FixedIndex {
        // Below the generation threshold of 0.7.
        generations: vec![generation(0.5, 0.9, Framework::React)],
        // Below the pattern threshold of 0.5.
        patterns: vec![pattern(0.3, None)],
    };
    let service = EnrichmentService::new(FixedEmbedder, index);

    let result = service
        .enrich("Create a card", &EnrichmentOptions::default())
        .await
        .unwrap();
    assert!(!result.occurred());

    let index = FixedIndex {
        // Quality below the 0.7 floor.
        generations: vec![generation(0.9, 0.4, Framework::React)],
        patterns: vec![],
    };
    let service = EnrichmentService::new(FixedEmbedder, index);
    let result = service
        .enrich("Create a card", &EnrichmentOptions::default())
        .await
        .unwrap();
    assert!(result.generations.is_empty());
}

#[tokio::test]
async fn framework_post_filter_applies_to_both_sets() {
    let index = FixedIndex {
        generations: vec![
            generation(0.9, 0.85, Framework::React),
            generation(0.85, 0.9, Framework::Vue),
        ],
        patterns: vec![
            pattern(0.6, Some(Framework::Vue)),
            // Framework-agnostic patterns survive the filter.
            pattern(0.6, None),
        ],
    };
    let service = EnrichmentService::new(FixedEmbedder, index);

    let options = EnrichmentOptions {
        framework: Some(Framework::React),
        ..Default::default()
    };
    let result = service.enrich("Create a card", &options).await.unwrap();

    assert_eq!(result.generations.len(), 1);
    assert_eq!(result.generations[0].framework, Framework::React);
    assert_eq!(result.patterns.len(), 1);
    assert_eq!(result.patterns[0].framework, None);
}

#[tokio::test]
async fn result_counts_respect_limits() {
    let index = FixedIndex {
        generations: (0..6)
            .map(|_| generation(0.9, 0.9, Framework::React))
            .collect(),
        patterns: (0..6).map(|_| pattern(0.6, None)).collect(),
    };
    let service = EnrichmentService::new(FixedEmbedder, index);

    let result = service
        .enrich("Create a card", &EnrichmentOptions::default())
        .await
        .unwrap();
    assert_eq!(result.generations.len(), 3);
    assert_eq!(result.patterns.len(), 2);
}

#[tokio::test]
async fn enrich_or_default_swallows_internal_failures() {
    let service = EnrichmentService::new(FailingEmbedder, FixedIndex::default());

    let result = service
        .enrich_or_default("Create a card", &EnrichmentOptions::default())
        .await;

    assert!(!result.occurred());
    assert_eq!(result.context_block, "");
}
