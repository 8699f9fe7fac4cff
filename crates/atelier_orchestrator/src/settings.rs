//! Orchestrator configuration.
//!
//! Settings follow a bundled-defaults-plus-override model: the defaults in
//! the crate's `atelier.toml` are always present, and a user `atelier.toml`
//! in the working directory overrides individual values.

use atelier_error::{AtelierResult, ConfigError};
use atelier_retrieval::EnrichmentOptions;
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Bundled defaults, compiled into the binary.
const DEFAULT_SETTINGS: &str = include_str!("../atelier.toml");

/// Provider selection settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProviderSettings {
    /// Default model for the direct provider backend
    pub default_model: String,
    /// Embedding model identifier
    pub embedding_model: String,
}

/// Enrichment tuning settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EnrichmentSettings {
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
}

impl EnrichmentSettings {
    /// Convert into per-request enrichment options (framework and BYOK
    /// credential are filled in per request).
    pub fn to_options(&self) -> EnrichmentOptions {
        EnrichmentOptions {
            max_generations: self.max_generations,
            max_patterns: self.max_patterns,
            min_quality: self.min_quality,
            generation_threshold: self.generation_threshold,
            pattern_threshold: self.pattern_threshold,
            framework: None,
            api_key: None,
        }
    }
}

/// Top-level orchestrator settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OrchestratorSettings {
    /// Provider selection settings
    pub provider: ProviderSettings,
    /// Enrichment tuning settings
    pub enrichment: EnrichmentSettings,
}

impl OrchestratorSettings {
    /// Load settings: bundled defaults merged with an optional user
    /// `atelier.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the user file exists but cannot be
    /// parsed, or when the merged settings are structurally invalid.
    pub fn load() -> AtelierResult<Self> {
        let config = Config::builder()
            .add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Toml))
            .add_source(File::with_name("atelier").required(false))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to load settings: {}", e)))?;

        let settings: Self = config
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Invalid settings: {}", e)))?;

        debug!(model = %settings.provider.default_model, "Loaded orchestrator settings");
        Ok(settings)
    }
}
