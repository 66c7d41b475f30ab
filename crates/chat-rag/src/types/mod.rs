//! Core types for the chat service

pub mod document;
pub mod query;
pub mod response;

pub use document::{Document, DocumentSummary, FileType, ScoredChunk};
pub use query::ChatRequest;
pub use response::{ChatResponse, StreamEvent, UploadOutcome};
