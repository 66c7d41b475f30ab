//! Error types for the chat service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for chat-rag operations
pub type Result<T> = std::result::Result<T, Error>;

/// Chat service errors
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration (chunk step, bind address, ...)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Document store already holds the maximum number of documents
    #[error("Maximum {max} documents allowed. Please delete a document first.")]
    CapacityExceeded { max: usize },

    /// Document not found
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Chat attempted before any document was uploaded
    #[error("No documents uploaded. Please upload documents first.")]
    NoDocuments,

    /// Chat request without a query
    #[error("Query is required")]
    MissingQuery,

    /// Upload request without a file
    #[error("No file uploaded")]
    NoFileUploaded,

    /// Unsupported file type
    #[error("Invalid file type: {0}. Only PDF, DOCX, and TXT files are allowed.")]
    UnsupportedFileType(String),

    /// File parsing error
    #[error("Failed to parse file '{filename}': {message}")]
    FileParse { filename: String, message: String },

    /// Generation collaborator failed (network, quota, decoding)
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Malformed multipart or request body
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a file parse error
    pub fn file_parse(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileParse {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create a generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::GenerationFailed(message.into())
    }

    /// Create an invalid configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Machine-readable kind, reported alongside the message
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidConfiguration(_) => "invalid_configuration",
            Error::CapacityExceeded { .. } => "capacity_exceeded",
            Error::DocumentNotFound(_) => "not_found",
            Error::NoDocuments => "no_documents",
            Error::MissingQuery => "missing_query",
            Error::NoFileUploaded => "no_file",
            Error::UnsupportedFileType(_) => "unsupported_type",
            Error::FileParse { .. } => "parse_error",
            Error::GenerationFailed(_) => "generation_failed",
            Error::BadRequest(_) => "bad_request",
            Error::Io(_) => "io_error",
            Error::Json(_) => "json_error",
            Error::Http(_) => "http_error",
            Error::Internal(_) => "internal_error",
        }
    }

    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::CapacityExceeded { .. }
            | Error::NoDocuments
            | Error::MissingQuery
            | Error::NoFileUploaded
            | Error::UnsupportedFileType(_)
            | Error::FileParse { .. }
            | Error::BadRequest(_)
            | Error::Json(_) => StatusCode::BAD_REQUEST,
            Error::DocumentNotFound(_) => StatusCode::NOT_FOUND,
            Error::GenerationFailed(_) | Error::Http(_) => StatusCode::BAD_GATEWAY,
            Error::InvalidConfiguration(_) | Error::Io(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
            "type": self.kind(),
        }));

        (status, body).into_response()
    }
}
