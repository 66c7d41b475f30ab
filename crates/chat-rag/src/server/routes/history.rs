//! Chat history endpoint

use axum::{
    extract::{Path, State},
    Json,
};

use crate::server::state::AppState;
use crate::types::response::HistoryResponse;

/// GET /api/chat/history/:session_id - Unknown sessions yield an empty history
pub async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<HistoryResponse> {
    Json(HistoryResponse {
        history: state.history().history(&session_id),
    })
}
