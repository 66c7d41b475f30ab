//! In-memory state: uploaded documents and chat transcripts.
//!
//! Nothing here is persisted; both live exactly as long as the server process.

mod chat_history;
mod document_store;

pub use chat_history::{ChatHistory, ChatTurn, Role};
pub use document_store::{DocumentStore, MAX_DOCUMENTS};
