//! End-to-end tests for the stream orchestrator.
//!
//! The backend, store, enricher, and post-processing sinks are in-memory
//! stand-ins; no network or database access is required.

use async_trait::async_trait;
use atelier_core::{
    BackendRequest, ComponentLibrary, Framework, GenerationEvent, GenerationRecord,
    GenerationRequest, GenerationStatus, GenerationUpdate, NewGeneration, VisualStyle,
};
use atelier_error::{AtelierResult, BackendError};
use atelier_interface::{
    CodeGenerator, EmbeddingBackend, EmbeddingMode, EmbeddingSink, FinishReason, GenerationStore,
    StreamChunk, Streaming, UsageLedger,
};
use atelier_orchestrator::Orchestrator;
use atelier_retrieval::{Enricher, EnrichmentOptions, EnrichmentResult};
use futures_util::StreamExt;
use futures_util::stream::Stream;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

// ─── Stub backend ───────────────────────────────────────────────────────────

struct StubBackend {
    chunks: Vec<&'static str>,
}

#[async_trait]
impl CodeGenerator for StubBackend {
    async fn generate(&self, _req: &BackendRequest) -> AtelierResult<String> {
        Ok(self.chunks.concat())
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }

    fn model_name(&self) -> &str {
        "stub-model"
    }
}

#[async_trait]
impl Streaming for StubBackend {
    async fn generate_stream(
        &self,
        _req: &BackendRequest,
    ) -> AtelierResult<Pin<Box<dyn Stream<Item = AtelierResult<StreamChunk>> + Send>>> {
        let chunks = self.chunks.clone();
        Ok(Box::pin(async_stream::stream! {
            for chunk in chunks {
                yield Ok(StreamChunk::text(chunk));
            }
            yield Ok(StreamChunk::done("", FinishReason::Stop));
        }))
    }
}

struct MidStreamFailure;

#[async_trait]
impl CodeGenerator for MidStreamFailure {
    async fn generate(&self, _req: &BackendRequest) -> AtelierResult<String> {
        Err(BackendError::new("connection reset").into())
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }

    fn model_name(&self) -> &str {
        "stub-model"
    }
}

#[async_trait]
impl Streaming for MidStreamFailure {
    async fn generate_stream(
        &self,
        _req: &BackendRequest,
    ) -> AtelierResult<Pin<Box<dyn Stream<Item = AtelierResult<StreamChunk>> + Send>>> {
        Ok(Box::pin(async_stream::stream! {
            yield Ok(StreamChunk::text("partial"));
            yield Err(BackendError::new("connection reset").into());
        }))
    }
}

// ─── In-memory store ────────────────────────────────────────────────────────

#[derive(Default)]
struct MemoryStore {
    records: Mutex<HashMap<Uuid, GenerationRecord>>,
    status_history: Mutex<Vec<GenerationStatus>>,
}

impl MemoryStore {
    fn record(&self, id: Uuid) -> Option<GenerationRecord> {
        self.records.lock().unwrap().get(&id).cloned()
    }

    fn history(&self) -> Vec<GenerationStatus> {
        self.status_history.lock().unwrap().clone()
    }

    fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerationStore for MemoryStore {
    async fn insert_generation(&self, generation: NewGeneration) -> AtelierResult<Uuid> {
        let id = Uuid::new_v4();
        let record = GenerationRecord {
            id,
            user_id: generation.user_id,
            prompt: generation.prompt,
            framework: generation.framework,
            status: generation.status,
            provider: generation.provider,
            model: generation.model,
            code: None,
            quality_score: None,
            error_message: None,
            parent_generation_id: generation.parent_generation_id,
            created_at: chrono::Utc::now(),
            completed_at: None,
        };
        self.status_history.lock().unwrap().push(record.status);
        self.records.lock().unwrap().insert(id, record);
        Ok(id)
    }

    async fn update_generation(&self, id: Uuid, update: GenerationUpdate) -> AtelierResult<()> {
        let mut records = self.records.lock().unwrap();
        let record = records.get_mut(&id).expect("record exists");
        if let Some(status) = update.status {
            record.status = status;
            self.status_history.lock().unwrap().push(status);
        }
        record.code = update.code.or(record.code.take());
        record.quality_score = update.quality_score.or(record.quality_score.take());
        record.error_message = update.error_message.or(record.error_message.take());
        record.completed_at = update.completed_at.or(record.completed_at.take());
        Ok(())
    }

    async fn get_generation(&self, id: Uuid) -> AtelierResult<Option<GenerationRecord>> {
        Ok(self.record(id))
    }
}

// ─── Post-processing stubs ──────────────────────────────────────────────────

struct FixedEmbedder;

#[async_trait]
impl EmbeddingBackend for FixedEmbedder {
    async fn embed(
        &self,
        _text: &str,
        _mode: EmbeddingMode,
        _api_key: Option<&str>,
    ) -> AtelierResult<Vec<f32>> {
        Ok(vec![0.25; 768])
    }

    fn dimensions(&self) -> usize {
        768
    }
}

#[derive(Default)]
struct RecordingSink {
    stored: Mutex<Vec<Uuid>>,
}

#[async_trait]
impl EmbeddingSink for RecordingSink {
    async fn store_prompt_embedding(
        &self,
        generation_id: Uuid,
        _embedding: &[f32],
    ) -> AtelierResult<()> {
        self.stored.lock().unwrap().push(generation_id);
        Ok(())
    }
}

#[derive(Default)]
struct FailingSink;

#[async_trait]
impl EmbeddingSink for FailingSink {
    async fn store_prompt_embedding(
        &self,
        _generation_id: Uuid,
        _embedding: &[f32],
    ) -> AtelierResult<()> {
        Err(BackendError::new("vector store offline").into())
    }
}

#[derive(Default)]
struct RecordingLedger {
    users: Mutex<Vec<Uuid>>,
}

#[async_trait]
impl UsageLedger for RecordingLedger {
    async fn record_generation(&self, user_id: Uuid) -> AtelierResult<()> {
        self.users.lock().unwrap().push(user_id);
        Ok(())
    }
}

struct FixedEnricher {
    context: &'static str,
}

#[async_trait]
impl Enricher for FixedEnricher {
    async fn enrich_or_default(
        &self,
        _prompt: &str,
        _options: &EnrichmentOptions,
    ) -> EnrichmentResult {
        EnrichmentResult {
            generations: Vec::new(),
            patterns: Vec::new(),
            context_block: self.context.to_string(),
        }
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────────

fn button_request() -> GenerationRequest {
    GenerationRequest {
        prompt: "Create a modern button component with hover effects".to_string(),
        framework: Framework::React,
        component_library: ComponentLibrary::Tailwind,
        style: VisualStyle::Modern,
        typescript: true,
        api_key: None,
        use_context: true,
        image: None,
        parent_generation_id: None,
    }
}

async fn collect(
    stream: Pin<Box<dyn Stream<Item = GenerationEvent> + Send>>,
) -> Vec<GenerationEvent> {
    stream.collect().await
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn successful_generation_runs_the_full_lifecycle() {
    let store = Arc::new(MemoryStore::default());
    let backend = Arc::new(StubBackend {
        chunks: vec!["export const Button", " = () => <button>", "Go</button>;"],
    });
    let orchestrator = Orchestrator::new(backend, store.clone());

    let stream = orchestrator
        .generate(Uuid::new_v4(), button_request())
        .await
        .expect("stream should start");
    let events = collect(stream).await;

    // start, 3 chunks, quality, complete
    assert!(matches!(events[0], GenerationEvent::Start { .. }));
    let chunk_count = events
        .iter()
        .filter(|e| matches!(e, GenerationEvent::Chunk { .. }))
        .count();
    assert_eq!(chunk_count, 3);

    let report = events
        .iter()
        .find_map(|e| match e {
            GenerationEvent::Quality { report, .. } => Some(report),
            _ => None,
        })
        .expect("quality event");
    assert_eq!(report.results.len(), 5);
    let gate_order: Vec<&str> = report.results.iter().map(|r| r.gate.name()).collect();
    assert_eq!(
        gate_order,
        ["security", "lint", "type-check", "accessibility", "responsive"]
    );

    let last = events.last().unwrap();
    match last {
        GenerationEvent::Complete {
            generation_id,
            code,
            context_used,
            ..
        } => {
            assert!(code.contains("Button"));
            assert!(!context_used);

            let record = store.record(*generation_id).expect("record exists");
            assert_eq!(record.status, GenerationStatus::Completed);
            assert!(record.code.as_deref().unwrap().contains("Button"));
            assert!(record.quality_score.is_some());
            assert_eq!(record.provider.as_deref(), Some("stub"));
        }
        other => panic!("expected complete event, got {:?}", other),
    }

    assert_eq!(
        store.history(),
        vec![GenerationStatus::Processing, GenerationStatus::Completed]
    );
}

#[tokio::test]
async fn validation_failure_creates_no_record() {
    let store = Arc::new(MemoryStore::default());
    let orchestrator = Orchestrator::new(
        Arc::new(StubBackend { chunks: vec![] }),
        store.clone(),
    );

    let mut request = button_request();
    request.prompt = "short".to_string();

    let result = orchestrator.generate(Uuid::new_v4(), request).await;
    assert!(matches!(
        result.err().unwrap().kind(),
        atelier_error::AtelierErrorKind::Validation(_)
    ));
    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn backend_failure_finalizes_record_as_failed_with_single_error_event() {
    let store = Arc::new(MemoryStore::default());
    let orchestrator = Orchestrator::new(Arc::new(MidStreamFailure), store.clone());

    let stream = orchestrator
        .generate(Uuid::new_v4(), button_request())
        .await
        .unwrap();
    let events = collect(stream).await;

    let error_count = events
        .iter()
        .filter(|e| matches!(e, GenerationEvent::Error { .. }))
        .count();
    assert_eq!(error_count, 1);
    assert!(matches!(
        events.last().unwrap(),
        GenerationEvent::Error { .. }
    ));
    // No complete event after an error.
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, GenerationEvent::Complete { .. }))
    );

    assert_eq!(
        store.history(),
        vec![GenerationStatus::Processing, GenerationStatus::Failed]
    );
    let record = store.records.lock().unwrap().values().next().cloned().unwrap();
    assert!(
        record
            .error_message
            .as_deref()
            .unwrap()
            .contains("connection reset")
    );
    assert!(record.code.is_none());
}

#[tokio::test]
async fn unconfigured_gateway_falls_back_to_direct_backend() {
    let store = Arc::new(MemoryStore::default());
    let backend = Arc::new(StubBackend {
        chunks: vec!["export const Button = () => <button>Go</button>;"],
    });
    // Gateway with neither endpoint nor token: unavailable, direct path wins.
    let orchestrator = Orchestrator::new(backend, store.clone())
        .with_gateway(atelier_gateway::GatewayClient::new(None, None));

    let stream = orchestrator
        .generate(Uuid::new_v4(), button_request())
        .await
        .unwrap();
    let _ = collect(stream).await;

    let record = store.records.lock().unwrap().values().next().cloned().unwrap();
    assert_eq!(record.provider.as_deref(), Some("stub"));
}

#[tokio::test]
async fn enrichment_context_is_forwarded_and_flagged() {
    let store = Arc::new(MemoryStore::default());
    let backend = Arc::new(StubBackend {
        chunks: vec!["export const Button = () => <button>Go</button>;"],
    });
    let orchestrator = Orchestrator::new(backend, store)
        .with_enricher(Arc::new(FixedEnricher {
            context: "Use these exemplars",
        }));

    let stream = orchestrator
        .generate(Uuid::new_v4(), button_request())
        .await
        .unwrap();
    let events = collect(stream).await;

    match events.last().unwrap() {
        GenerationEvent::Complete { context_used, .. } => assert!(context_used),
        other => panic!("expected complete event, got {:?}", other),
    }
}

#[tokio::test]
async fn retrieval_toggle_disables_enrichment() {
    let store = Arc::new(MemoryStore::default());
    let backend = Arc::new(StubBackend {
        chunks: vec!["export const Button = () => <button>Go</button>;"],
    });
    let orchestrator = Orchestrator::new(backend, store)
        .with_enricher(Arc::new(FixedEnricher {
            context: "Use these exemplars",
        }));

    let mut request = button_request();
    request.use_context = false;

    let stream = orchestrator.generate(Uuid::new_v4(), request).await.unwrap();
    let events = collect(stream).await;

    match events.last().unwrap() {
        GenerationEvent::Complete { context_used, .. } => assert!(!context_used),
        other => panic!("expected complete event, got {:?}", other),
    }
}

#[tokio::test]
async fn post_processing_runs_detached_after_completion() {
    let store = Arc::new(MemoryStore::default());
    let sink = Arc::new(RecordingSink::default());
    let ledger = Arc::new(RecordingLedger::default());
    let user_id = Uuid::new_v4();

    let backend = Arc::new(StubBackend {
        chunks: vec!["export const Button = () => <button>Go</button>;"],
    });
    let orchestrator = Orchestrator::new(backend, store)
        .with_embedding_storage(Arc::new(FixedEmbedder), sink.clone())
        .with_usage_ledger(ledger.clone());

    let stream = orchestrator.generate(user_id, button_request()).await.unwrap();
    let events = collect(stream).await;
    assert!(matches!(
        events.last().unwrap(),
        GenerationEvent::Complete { .. }
    ));

    // The detached tasks race the assertion; give them a moment.
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(sink.stored.lock().unwrap().len(), 1);
    assert_eq!(ledger.users.lock().unwrap().as_slice(), &[user_id]);
}

#[tokio::test]
async fn post_processing_failure_never_reaches_the_caller() {
    let store = Arc::new(MemoryStore::default());
    let backend = Arc::new(StubBackend {
        chunks: vec!["export const Button = () => <button>Go</button>;"],
    });
    let orchestrator = Orchestrator::new(backend, store.clone())
        .with_embedding_storage(Arc::new(FixedEmbedder), Arc::new(FailingSink));

    let stream = orchestrator
        .generate(Uuid::new_v4(), button_request())
        .await
        .unwrap();
    let events = collect(stream).await;

    // The stream still completes and the record stays completed.
    assert!(matches!(
        events.last().unwrap(),
        GenerationEvent::Complete { .. }
    ));
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(
        store.history(),
        vec![GenerationStatus::Processing, GenerationStatus::Completed]
    );
}
