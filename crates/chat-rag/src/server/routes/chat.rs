//! Chat endpoints, plain and streamed

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::{Stream, StreamExt};
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::{Error, Result};
use crate::generation::{self, PreparedChat};
use crate::server::state::AppState;
use crate::types::{ChatRequest, ChatResponse, StreamEvent};

fn prepare(state: &AppState, request: &ChatRequest) -> Result<PreparedChat> {
    let store = state.documents().read();
    PreparedChat::prepare(
        &store,
        state.searcher(),
        &request.query,
        state.config().retrieval.top_k,
    )
}

fn to_event(payload: &StreamEvent) -> Event {
    Event::default().json_data(payload).unwrap_or_else(|e| {
        tracing::error!("Failed to encode stream event: {}", e);
        Event::default().data(r#"{"error":"Failed to encode stream event"}"#)
    })
}

/// POST /api/chat - Answer a question in one response
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let prepared = prepare(&state, &request)?;
    let llm = state.llm();
    let response = generation::answer(llm.as_ref(), state.history(), &request, prepared).await?;
    Ok(Json(response))
}

/// POST /api/chat/stream - Answer a question as server-sent events.
///
/// Emits `{chunk}` events, then `{done, sources}`. A generation failure after the
/// stream has opened is reported as a final `{error}` event. Generation runs to
/// completion even if the client goes away, and the exchange is still recorded.
pub async fn chat_stream(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, Infallible>>>> {
    let prepared = prepare(&state, &request)?;
    let session = request.session().map(str::to_string);
    let (tx, rx) = mpsc::channel::<Event>(32);

    tokio::spawn(async move {
        let llm = state.llm();
        let mut full = String::new();

        // a departed client stops the events, not the generation
        let streamed = async {
            let mut connected = true;
            let mut pieces = llm.complete_stream(&prepared.prompt).await?;
            while let Some(piece) = pieces.next().await {
                let piece = piece?;
                full.push_str(&piece);
                if connected
                    && tx
                        .send(to_event(&StreamEvent::Chunk { chunk: piece }))
                        .await
                        .is_err()
                {
                    tracing::debug!("Stream client disconnected, finishing generation");
                    connected = false;
                }
            }
            Ok::<bool, Error>(connected)
        }
        .await;

        match streamed {
            Ok(connected) => {
                prepared.record(state.history(), session.as_deref(), &full);
                if connected {
                    let _ = tx.send(to_event(&StreamEvent::done(prepared.sources()))).await;
                }
            }
            Err(e) => {
                tracing::warn!("Stream error: {}", e);
                let _ = tx
                    .send(to_event(&StreamEvent::Error {
                        error: e.to_string(),
                    }))
                    .await;
            }
        }
    });

    let stream = ReceiverStream::new(rx).map(Ok::<_, Infallible>);
    Ok(Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15))))
}
