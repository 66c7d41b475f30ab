//! Response types for the HTTP API

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use super::document::{Document, DocumentSummary, ScoredChunk};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always "ok" while the server is up
    pub status: String,
    /// Documents currently stored
    pub documents_count: usize,
}

/// Document listing, used by the client for `@mention` autocomplete
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentListResponse {
    /// Stored documents in upload order
    pub documents: Vec<DocumentSummary>,
    /// Store capacity
    pub max_documents: usize,
}

/// Result of deleting a document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    /// Always true; failures are reported as errors
    pub success: bool,
    /// Filename of the removed document
    #[serde(rename = "fileName")]
    pub filename: String,
}

/// Result of a single-file upload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Always true; failures are reported as errors
    pub success: bool,
    /// Original filename
    #[serde(rename = "fileName")]
    pub filename: String,
    /// Number of chunks created
    pub total_chunks: usize,
    /// ID of the new document
    pub document_id: Uuid,
}

impl From<&Document> for UploadResponse {
    fn from(doc: &Document) -> Self {
        Self {
            success: true,
            filename: doc.filename.clone(),
            total_chunks: doc.chunk_count(),
            document_id: doc.id,
        }
    }
}

/// Per-file result of a batch upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// File was extracted, chunked and stored
    Ok {
        filename: String,
        total_chunks: usize,
        document_id: Uuid,
    },
    /// File was rejected
    Err { filename: String, reason: String },
}

impl UploadOutcome {
    /// Failed outcome
    pub fn failed(filename: impl Into<String>, reason: impl ToString) -> Self {
        Self::Err {
            filename: filename.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the file was stored
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// Filename the outcome refers to
    pub fn filename(&self) -> &str {
        match self {
            Self::Ok { filename, .. } | Self::Err { filename, .. } => filename,
        }
    }
}

impl From<UploadResponse> for UploadOutcome {
    fn from(stored: UploadResponse) -> Self {
        Self::Ok {
            filename: stored.filename,
            total_chunks: stored.total_chunks,
            document_id: stored.document_id,
        }
    }
}

// Wire shape: `{success: true, fileName, totalChunks, documentId}` or
// `{success: false, fileName, error}`.
impl Serialize for UploadOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Ok {
                filename,
                total_chunks,
                document_id,
            } => {
                let mut s = serializer.serialize_struct("UploadOutcome", 4)?;
                s.serialize_field("success", &true)?;
                s.serialize_field("fileName", filename)?;
                s.serialize_field("totalChunks", total_chunks)?;
                s.serialize_field("documentId", document_id)?;
                s.end()
            }
            Self::Err { filename, reason } => {
                let mut s = serializer.serialize_struct("UploadOutcome", 3)?;
                s.serialize_field("success", &false)?;
                s.serialize_field("fileName", filename)?;
                s.serialize_field("error", reason)?;
                s.end()
            }
        }
    }
}

/// Batch upload response
#[derive(Debug, Clone, Serialize)]
pub struct BatchUploadResponse {
    /// True when the request itself was processed
    pub success: bool,
    /// One outcome per file, in request order
    pub results: Vec<UploadOutcome>,
}

/// Non-streaming chat response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated answer
    pub answer: String,
    /// Filename of every chunk used as context, in selection order
    pub sources: Vec<String>,
}

impl ChatResponse {
    /// Build from an answer and the chunks it was grounded on
    pub fn new(answer: String, chunks: &[ScoredChunk]) -> Self {
        Self {
            answer,
            sources: sources_of(chunks),
        }
    }
}

/// Filenames of the selected chunks, in selection order
pub fn sources_of(chunks: &[ScoredChunk]) -> Vec<String> {
    chunks.iter().map(|c| c.filename.clone()).collect()
}

/// Server-sent event payloads of the streaming chat route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreamEvent {
    /// Incremental answer text
    Chunk { chunk: String },
    /// End of answer
    Done { done: bool, sources: Vec<String> },
    /// Generation failed mid-stream
    Error { error: String },
}

impl StreamEvent {
    /// Terminal event with the answer's sources
    pub fn done(sources: Vec<String>) -> Self {
        Self::Done {
            done: true,
            sources,
        }
    }
}

/// Chat history response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// Turns in insertion order
    pub history: Vec<crate::storage::ChatTurn>,
}
