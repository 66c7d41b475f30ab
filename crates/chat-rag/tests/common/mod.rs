//! Shared helpers for router-level tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use futures::StreamExt;
use http_body_util::BodyExt;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use chat_rag::providers::{LlmProvider, TextStream};
use chat_rag::server::{build_router, AppState};
use chat_rag::{Error, RagConfig, Result};

pub const BOUNDARY: &str = "chat-rag-test-boundary";

/// Provider that replays a fixed answer and records every prompt
#[derive(Default)]
pub struct ScriptedProvider {
    pub pieces: Vec<String>,
    pub fail: bool,
    pub delay: Option<Duration>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn answering(pieces: &[&str]) -> Self {
        Self {
            pieces: pieces.iter().map(|p| p.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Streams `pieces` with `delay` before each one
    pub fn slow(pieces: &[&str], delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::answering(pieces)
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().last().cloned()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());
        if self.fail {
            return Err(Error::generation("quota exceeded"));
        }
        Ok(self.pieces.concat())
    }

    async fn complete_stream(&self, prompt: &str) -> Result<TextStream> {
        self.prompts.lock().push(prompt.to_string());
        if self.fail {
            return Err(Error::generation("quota exceeded"));
        }
        let pieces: Vec<Result<String>> = self.pieces.iter().cloned().map(Ok).collect();
        let stream = futures::stream::iter(pieces);
        match self.delay {
            Some(delay) => Ok(stream
                .then(move |piece| async move {
                    tokio::time::sleep(delay).await;
                    piece
                })
                .boxed()),
            None => Ok(stream.boxed()),
        }
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(!self.fail)
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-1"
    }
}

/// Router over fresh state with small chunks
pub fn router_with(provider: Arc<ScriptedProvider>) -> Router {
    let mut config = RagConfig::default();
    config.chunking.chunk_size = 40;
    config.chunking.chunk_overlap = 10;
    let state = AppState::with_provider(config, provider).unwrap();
    build_router(state)
}

/// Multipart body with one part per `(filename, content type, bytes)`
pub fn multipart_body(field: &str, files: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (filename, content_type, data) in files {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                field, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn upload_request(uri: &str, field: &str, files: &[(&str, &str, &[u8])]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(field, files)))
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_text(resp: Response) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(resp: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(resp).await).unwrap()
}

/// Upload one text file and return its document id
pub async fn upload_text(app: &Router, filename: &str, text: &str) -> String {
    let req = upload_request("/api/upload", "document", &[(filename, "text/plain", text.as_bytes())]);
    let resp = send(app, req).await;
    assert_eq!(resp.status(), 200, "upload of {} failed", filename);
    let json = body_json(resp).await;
    json["documentId"].as_str().unwrap().to_string()
}
