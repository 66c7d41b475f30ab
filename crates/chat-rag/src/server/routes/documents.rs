//! Document management and health endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::Result;
use crate::server::state::AppState;
use crate::storage::MAX_DOCUMENTS;
use crate::types::response::{DeleteResponse, DocumentListResponse, HealthResponse};
use crate::types::DocumentSummary;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        documents_count: state.document_count(),
    })
}

/// GET /api/documents - List documents in upload order
pub async fn list_documents(State(state): State<AppState>) -> Json<DocumentListResponse> {
    let documents = state
        .documents()
        .read()
        .list_documents()
        .iter()
        .map(DocumentSummary::from)
        .collect();

    Json(DocumentListResponse {
        documents,
        max_documents: MAX_DOCUMENTS,
    })
}

/// GET /api/documents/:id - Get a single document summary
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DocumentSummary>> {
    let store = state.documents().read();
    let doc = store.get_document(&id)?;
    Ok(Json(DocumentSummary::from(doc)))
}

/// DELETE /api/documents/:id - Remove a document
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let removed = state.documents().write().delete_document(&id)?;

    Ok(Json(DeleteResponse {
        success: true,
        filename: removed.filename,
    }))
}
