//! Generation lifecycle orchestration.

use atelier_core::{
    BackendRequest, GenerationEvent, GenerationRequest, GenerationStatus, GenerationUpdate,
    NewGeneration,
};
use atelier_error::{AtelierError, AtelierResult};
use atelier_gateway::GatewayClient;
use atelier_interface::{
    EmbeddingBackend, EmbeddingMode, EmbeddingSink, GenerationStore, Streaming, UsageLedger,
};
use atelier_quality::run_all_gates;
use atelier_retrieval::{Enricher, EnrichmentOptions, EnrichmentResult};
use futures_util::StreamExt;
use futures_util::stream::Stream;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Outbound event stream handed back to the web layer.
pub type EventStream = Pin<Box<dyn Stream<Item = GenerationEvent> + Send>>;

/// Coordinates one generation request across enrichment, backend streaming,
/// quality gating, and record lifecycle.
///
/// The orchestrator is single-flow per request: it never parallelizes
/// backend generation, and it mutates the generation record exactly twice
/// (`processing → completed` or `processing → failed`). Post-completion
/// embedding storage and usage accounting run as detached tasks whose
/// failures are logged and discarded.
#[derive(Clone)]
pub struct Orchestrator {
    direct: Arc<dyn Streaming>,
    gateway: Option<Arc<GatewayClient>>,
    enricher: Option<Arc<dyn Enricher>>,
    store: Arc<dyn GenerationStore>,
    embedder: Option<Arc<dyn EmbeddingBackend>>,
    embedding_sink: Option<Arc<dyn EmbeddingSink>>,
    usage_ledger: Option<Arc<dyn UsageLedger>>,
    enrichment_defaults: EnrichmentOptions,
}

impl Orchestrator {
    /// Create an orchestrator over a direct backend and a record store.
    pub fn new(direct: Arc<dyn Streaming>, store: Arc<dyn GenerationStore>) -> Self {
        Self {
            direct,
            gateway: None,
            enricher: None,
            store,
            embedder: None,
            embedding_sink: None,
            usage_ledger: None,
            enrichment_defaults: EnrichmentOptions::default(),
        }
    }

    /// Route through the tool-invocation gateway when it is configured.
    ///
    /// An unconfigured gateway is ignored; the direct path remains in use.
    pub fn with_gateway(mut self, gateway: GatewayClient) -> Self {
        self.gateway = Some(Arc::new(gateway));
        self
    }

    /// Enable context enrichment.
    pub fn with_enricher(mut self, enricher: Arc<dyn Enricher>) -> Self {
        self.enricher = Some(enricher);
        self
    }

    /// Enable fire-and-forget prompt-embedding storage after completion.
    pub fn with_embedding_storage(
        mut self,
        embedder: Arc<dyn EmbeddingBackend>,
        sink: Arc<dyn EmbeddingSink>,
    ) -> Self {
        self.embedder = Some(embedder);
        self.embedding_sink = Some(sink);
        self
    }

    /// Enable fire-and-forget usage accounting after completion.
    pub fn with_usage_ledger(mut self, ledger: Arc<dyn UsageLedger>) -> Self {
        self.usage_ledger = Some(ledger);
        self
    }

    /// Override the enrichment tuning defaults.
    pub fn with_enrichment_defaults(mut self, defaults: EnrichmentOptions) -> Self {
        self.enrichment_defaults = defaults;
        self
    }

    /// The backend this request will run on: the gateway when both of its
    /// settings are present, the direct provider otherwise.
    fn select_backend(&self) -> Arc<dyn Streaming> {
        match &self.gateway {
            Some(gateway) if gateway.is_configured() => gateway.clone(),
            _ => self.direct.clone(),
        }
    }

    /// Run one generation request, returning the live event stream.
    ///
    /// Validation and record creation happen before this returns, so schema
    /// violations and store failures surface as an `Err` with no stream and
    /// no partial side effects beyond the inserted record.
    ///
    /// # Errors
    ///
    /// - Validation errors for out-of-bounds requests (no record is created)
    /// - Store errors when the initial record insert fails
    #[instrument(skip(self, request), fields(framework = request.framework.as_str()))]
    pub async fn generate(
        &self,
        user_id: Uuid,
        request: GenerationRequest,
    ) -> AtelierResult<EventStream> {
        request.validate()?;

        let backend = self.select_backend();
        let generation_id = self
            .store
            .insert_generation(NewGeneration {
                user_id,
                prompt: request.prompt.clone(),
                framework: request.framework,
                status: GenerationStatus::Processing,
                provider: Some(backend.provider_name().to_string()),
                model: Some(backend.model_name().to_string()),
                parent_generation_id: request.parent_generation_id,
            })
            .await?;

        info!(%generation_id, provider = backend.provider_name(), "Generation accepted");

        let orchestrator = self.clone();
        Ok(Box::pin(async_stream::stream! {
            yield GenerationEvent::start(generation_id);

            let enrichment = orchestrator.enrich(&request).await;
            let context_used = enrichment.occurred();
            let backend_request =
                BackendRequest::from_request(&request, Some(enrichment.context_block));

            let mut chunks = match backend.generate_stream(&backend_request).await {
                Ok(chunks) => chunks,
                Err(e) => {
                    orchestrator.finalize_failed(generation_id, &e).await;
                    yield GenerationEvent::error(e.to_string());
                    return;
                }
            };

            let mut code = String::new();
            loop {
                match chunks.next().await {
                    Some(Ok(chunk)) => {
                        if !chunk.content.is_empty() {
                            code.push_str(&chunk.content);
                            yield GenerationEvent::chunk(chunk.content);
                        }
                        if chunk.is_final {
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        orchestrator.finalize_failed(generation_id, &e).await;
                        yield GenerationEvent::error(e.to_string());
                        return;
                    }
                    // Stream ended without a final chunk; treat what we
                    // accumulated as the full response.
                    None => break,
                }
            }

            let report = run_all_gates(&code);
            let quality_passed = report.passed;
            let score = report.score;
            yield GenerationEvent::quality(report);

            if let Err(e) = orchestrator
                .store
                .update_generation(generation_id, GenerationUpdate::completed(&code, score))
                .await
            {
                warn!(%generation_id, error = %e, "Failed to finalize generation record");
                yield GenerationEvent::error(format!("Failed to persist generation: {}", e));
                return;
            }

            orchestrator.spawn_post_processing(generation_id, user_id, &request);

            yield GenerationEvent::complete(generation_id, code, quality_passed, context_used);
        }))
    }

    /// Resolve the enrichment step for a request; failures and the disabled
    /// case both yield the empty result.
    async fn enrich(&self, request: &GenerationRequest) -> EnrichmentResult {
        if !request.use_context {
            return EnrichmentResult::empty();
        }
        let Some(enricher) = &self.enricher else {
            return EnrichmentResult::empty();
        };
        let options = EnrichmentOptions {
            framework: Some(request.framework),
            api_key: request.api_key.clone(),
            ..self.enrichment_defaults.clone()
        };
        enricher.enrich_or_default(&request.prompt, &options).await
    }

    /// Mark the record failed; a store failure here is logged and dropped
    /// because the stream is already delivering the original error.
    async fn finalize_failed(&self, generation_id: Uuid, error: &AtelierError) {
        if let Err(e) = self
            .store
            .update_generation(generation_id, GenerationUpdate::failed(error.to_string()))
            .await
        {
            warn!(%generation_id, error = %e, "Failed to mark generation as failed");
        }
    }

    /// Launch the detached post-completion tasks: prompt-embedding storage
    /// and usage accounting. Their errors never reach the caller.
    fn spawn_post_processing(
        &self,
        generation_id: Uuid,
        user_id: Uuid,
        request: &GenerationRequest,
    ) {
        if let (Some(embedder), Some(sink)) = (self.embedder.clone(), self.embedding_sink.clone())
        {
            let prompt = request.prompt.clone();
            let api_key = request.api_key.clone();
            tokio::spawn(async move {
                let embedding = match embedder
                    .embed(&prompt, EmbeddingMode::Document, api_key.as_deref())
                    .await
                {
                    Ok(embedding) => embedding,
                    Err(e) => {
                        warn!(%generation_id, error = %e, "Post-completion embedding failed");
                        return;
                    }
                };
                if let Err(e) = sink.store_prompt_embedding(generation_id, &embedding).await {
                    warn!(%generation_id, error = %e, "Embedding storage failed");
                } else {
                    debug!(%generation_id, "Stored prompt embedding");
                }
            });
        }

        if let Some(ledger) = self.usage_ledger.clone() {
            tokio::spawn(async move {
                if let Err(e) = ledger.record_generation(user_id).await {
                    warn!(%user_id, error = %e, "Usage accounting failed");
                }
            });
        }
    }
}
