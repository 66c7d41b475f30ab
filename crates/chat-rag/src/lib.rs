//! chat-rag: Document chat with lexical retrieval and `@mention` document targeting
//!
//! Users upload a handful of documents (at most five). Each document is split into
//! overlapping character windows. A chat query is answered by an external LLM that
//! sees the most relevant chunks as context. Prefixing a document name with `@`
//! restricts retrieval to that document, and naming several documents switches the
//! ranker into a balanced mode where every named document contributes chunks.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod storage;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use retrieval::{parse_mentions, LexicalSearcher, MentionQuery};
pub use storage::{ChatHistory, DocumentStore, MAX_DOCUMENTS};
pub use types::{
    document::{Document, ScoredChunk},
    query::ChatRequest,
    response::{ChatResponse, UploadOutcome},
};
