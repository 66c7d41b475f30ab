//! Application state for the chat server

use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::RagConfig;
use crate::error::Result;
use crate::ingestion::{IngestPipeline, TextChunker};
use crate::providers::{GeminiClient, LlmProvider};
use crate::retrieval::LexicalSearcher;
use crate::storage::{ChatHistory, DocumentStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Uploaded documents
    documents: RwLock<DocumentStore>,
    /// Chat transcripts by session
    history: ChatHistory,
    /// LLM provider (Gemini in production)
    llm_provider: Arc<dyn LlmProvider>,
    /// Extraction and chunking
    pipeline: IngestPipeline,
    /// Chunk ranker
    searcher: LexicalSearcher,
    /// Ready state
    ready: RwLock<bool>,
}

impl AppState {
    /// Create new application state backed by Gemini
    pub fn new(config: RagConfig) -> Result<Self> {
        let llm = Arc::new(GeminiClient::new(&config.llm)?);
        if !llm.has_api_key() {
            tracing::warn!("GEMINI_API_KEY is not set; chat requests will fail");
        }
        tracing::info!("Gemini client initialized (model: {})", config.llm.model);

        Self::with_provider(config, llm)
    }

    /// Create application state around an existing LLM provider
    pub fn with_provider(config: RagConfig, llm_provider: Arc<dyn LlmProvider>) -> Result<Self> {
        config.validate()?;

        let chunker = TextChunker::from_config(&config.chunking)?;
        let searcher = LexicalSearcher::from_config(&config.retrieval);

        tracing::info!(
            "Chunking: {} chars with {} overlap, top_k {}",
            chunker.chunk_size(),
            chunker.overlap(),
            config.retrieval.top_k
        );

        let state = Self {
            inner: Arc::new(AppStateInner {
                config,
                documents: RwLock::new(DocumentStore::new()),
                history: ChatHistory::new(),
                llm_provider,
                pipeline: IngestPipeline::new(chunker),
                searcher,
                ready: RwLock::new(false),
            }),
        };
        state.set_ready(true);

        Ok(state)
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the document store
    pub fn documents(&self) -> &RwLock<DocumentStore> {
        &self.inner.documents
    }

    /// Get chat history
    pub fn history(&self) -> &ChatHistory {
        &self.inner.history
    }

    /// Get the LLM provider
    pub fn llm(&self) -> Arc<dyn LlmProvider> {
        Arc::clone(&self.inner.llm_provider)
    }

    /// Get the ingestion pipeline
    pub fn pipeline(&self) -> IngestPipeline {
        self.inner.pipeline
    }

    /// Get the chunk ranker
    pub fn searcher(&self) -> &LexicalSearcher {
        &self.inner.searcher
    }

    /// Number of stored documents
    pub fn document_count(&self) -> usize {
        self.inner.documents.read().len()
    }

    /// Check if ready
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.read()
    }

    /// Set ready state
    pub fn set_ready(&self, ready: bool) {
        *self.inner.ready.write() = ready;
    }
}
