//! API routes for the chat server

pub mod chat;
pub mod documents;
pub mod history;
pub mod upload;

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Router,
};

use crate::config::ServerConfig;
use crate::server::state::AppState;

/// Room for multipart boundaries and headers on top of the file bytes
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Build all API routes
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .route("/health", get(documents::health))
        // Document management
        .route("/documents", get(documents::list_documents))
        .route(
            "/documents/:id",
            get(documents::get_document).delete(documents::delete_document),
        )
        // Uploads - with larger body limits
        .route(
            "/upload",
            post(upload::upload_document)
                .layer(DefaultBodyLimit::max(config.max_file_size + MULTIPART_OVERHEAD)),
        )
        .route(
            "/upload/multiple",
            post(upload::upload_documents)
                .layer(DefaultBodyLimit::max(config.max_batch_body() + MULTIPART_OVERHEAD)),
        )
        // Chat
        .route("/chat", post(chat::chat))
        .route("/chat/stream", post(chat::chat_stream))
        .route("/chat/history/:session_id", get(history::get_history))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    let (documents, chunks) = {
        let store = state.documents().read();
        (store.len(), store.total_chunks())
    };
    let llm = state.llm();

    axum::Json(serde_json::json!({
        "name": "chat-rag",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Chat with up to five uploaded documents, with @mention targeting",
        "endpoints": {
            "GET /api/health": "Liveness and document count",
            "GET /api/documents": "List documents",
            "GET /api/documents/:id": "Get document details",
            "DELETE /api/documents/:id": "Delete a document",
            "POST /api/upload": "Upload one document (field: document)",
            "POST /api/upload/multiple": "Upload several documents (field: documents)",
            "POST /api/chat": "Ask a question",
            "POST /api/chat/stream": "Ask a question, answer streamed as SSE",
            "GET /api/chat/history/:sessionId": "Chat history of a session"
        },
        "features": {
            "mentions": "@name restricts retrieval to matching documents",
            "balanced_retrieval": "Several mentions draw chunks from every named document",
            "max_documents": crate::storage::MAX_DOCUMENTS
        },
        "stats": {
            "documents": documents,
            "chunks": chunks,
            "sessions": state.history().session_count(),
            "provider": llm.name(),
            "model": llm.model()
        }
    }))
}
