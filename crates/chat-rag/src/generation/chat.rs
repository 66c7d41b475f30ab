//! Chat pipeline: mention parsing, retrieval, prompt assembly and history

use crate::error::{Error, Result};
use crate::providers::LlmProvider;
use crate::retrieval::{parse_mentions, LexicalSearcher};
use crate::storage::{ChatHistory, DocumentStore};
use crate::types::response::sources_of;
use crate::types::{ChatRequest, ChatResponse, ScoredChunk};

use super::prompt::PromptBuilder;

/// A chat query resolved against the store, ready for generation
#[derive(Debug, Clone)]
pub struct PreparedChat {
    /// Raw query as the user typed it
    pub query: String,
    /// Lower-cased `@mention` tokens
    pub mentions: Vec<String>,
    /// Chunks selected as context
    pub chunks: Vec<ScoredChunk>,
    /// Final prompt sent to the provider
    pub prompt: String,
}

impl PreparedChat {
    /// Resolve `query` against the documents in `store`.
    ///
    /// Fails with [`Error::MissingQuery`] on a blank query and
    /// [`Error::NoDocuments`] on an empty store.
    pub fn prepare(
        store: &DocumentStore,
        searcher: &LexicalSearcher,
        query: &str,
        top_k: usize,
    ) -> Result<Self> {
        if query.trim().is_empty() {
            return Err(Error::MissingQuery);
        }

        let parsed = parse_mentions(query);
        let question = parsed.retrieval_text(query);
        let chunks = store.retrieve(searcher, question, top_k, &parsed.mentions)?;

        let context = PromptBuilder::build_context(&chunks);
        let prompt = PromptBuilder::build_chat_prompt(question, &context, &parsed.mentions);

        Ok(Self {
            query: query.to_string(),
            mentions: parsed.mentions,
            chunks,
            prompt,
        })
    }

    /// Filenames of the context chunks, in selection order
    pub fn sources(&self) -> Vec<String> {
        sources_of(&self.chunks)
    }

    /// Record a finished exchange under `session_id`, if there is one
    pub fn record(&self, history: &ChatHistory, session_id: Option<&str>, answer: &str) {
        if let Some(session_id) = session_id {
            history.append_exchange(session_id, &self.query, answer);
        }
    }
}

/// Answer a non-streaming chat request.
///
/// History is only written after the provider returned an answer.
pub async fn answer(
    provider: &dyn LlmProvider,
    history: &ChatHistory,
    request: &ChatRequest,
    prepared: PreparedChat,
) -> Result<ChatResponse> {
    tracing::info!(
        "Generating answer with {} ({} context chunks)",
        provider.model(),
        prepared.chunks.len()
    );

    let answer = provider.complete(&prepared.prompt).await?;
    prepared.record(history, request.session(), &answer);

    Ok(ChatResponse::new(answer, &prepared.chunks))
}
