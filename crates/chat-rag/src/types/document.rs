//! Document and chunk types with source tracking for citations

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Supported upload types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
    /// Old Microsoft Word document (.doc)
    Doc,
    /// Plain text file
    Txt,
    /// Anything else
    Unknown,
}

impl FileType {
    /// MIME types accepted by the upload routes
    pub const ALLOWED_MIMES: [&'static str; 4] = [
        "application/pdf",
        "text/plain",
        "application/msword",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ];

    /// Detect file type from a MIME type
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime.split(';').next().unwrap_or("").trim().to_lowercase();
        match essence.as_str() {
            "application/pdf" => Self::Pdf,
            "text/plain" => Self::Txt,
            "application/msword" => Self::Doc,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => Self::Docx,
            _ => Self::Unknown,
        }
    }

    /// Detect file type from a file name's extension
    pub fn from_filename(filename: &str) -> Self {
        mime_guess::from_path(filename)
            .iter()
            .map(|m| Self::from_mime(m.essence_str()))
            .find(FileType::is_supported)
            .unwrap_or(Self::Unknown)
    }

    /// Resolve the type of an upload.
    ///
    /// A declared MIME type wins. Generic types (`application/octet-stream` or none)
    /// fall back to the extension.
    pub fn detect(filename: &str, content_type: Option<&str>) -> Self {
        match content_type.map(Self::from_mime) {
            Some(file_type) if file_type.is_supported() => file_type,
            Some(_) if !is_generic_mime(content_type) => Self::Unknown,
            _ => Self::from_filename(filename),
        }
    }

    /// Check if this is a supported file type
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Get display name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "Word Document (.docx)",
            Self::Doc => "Word Document (.doc)",
            Self::Txt => "Text File",
            Self::Unknown => "Unknown",
        }
    }
}

fn is_generic_mime(content_type: Option<&str>) -> bool {
    match content_type {
        None => true,
        Some(mime) => {
            let mime = mime.trim();
            mime.is_empty() || mime.eq_ignore_ascii_case("application/octet-stream")
        }
    }
}

/// An uploaded document. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique document ID
    pub id: Uuid,
    /// Original filename as uploaded by user
    #[serde(rename = "fileName")]
    pub filename: String,
    /// Chunk texts in document order
    pub chunks: Vec<String>,
    /// Upload timestamp
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

impl Document {
    /// Create a new document with a fresh ID
    pub fn new(filename: impl Into<String>, chunks: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename: filename.into(),
            chunks,
            uploaded_at: chrono::Utc::now(),
        }
    }

    /// Number of chunks
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}

/// Document summary for listings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    /// Document ID
    pub id: Uuid,
    /// Original filename
    #[serde(rename = "fileName")]
    pub filename: String,
    /// Number of chunks
    pub chunks_count: usize,
    /// Upload timestamp
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id,
            filename: doc.filename.clone(),
            chunks_count: doc.chunk_count(),
            uploaded_at: doc.uploaded_at,
        }
    }
}

/// A chunk scored against one query. Lives for a single retrieval call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredChunk {
    /// Chunk text
    pub text: String,
    /// Number of distinct query keywords found in the chunk
    pub score: usize,
    /// Originating document's filename
    #[serde(rename = "fileName")]
    pub filename: String,
    /// Index of the chunk within its document
    pub index: usize,
    /// Originating document ID
    pub document_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mime() {
        assert_eq!(FileType::from_mime("application/pdf"), FileType::Pdf);
        assert_eq!(FileType::from_mime("text/plain; charset=utf-8"), FileType::Txt);
        assert_eq!(FileType::from_mime("image/png"), FileType::Unknown);
    }

    #[test]
    fn test_detect_prefers_declared_mime() {
        assert_eq!(FileType::detect("notes.pdf", Some("text/plain")), FileType::Txt);
        assert_eq!(FileType::detect("image.png", Some("image/png")), FileType::Unknown);
    }

    #[test]
    fn test_detect_falls_back_to_extension() {
        assert_eq!(
            FileType::detect("report.pdf", Some("application/octet-stream")),
            FileType::Pdf
        );
        assert_eq!(FileType::detect("notes.txt", None), FileType::Txt);
        assert_eq!(FileType::detect("report.docx", None), FileType::Docx);
        assert_eq!(FileType::detect("archive.zip", None), FileType::Unknown);
    }

    #[test]
    fn test_document_serializes_camel_case() {
        let doc = Document::new("alpha.pdf", vec!["a".to_string()]);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["fileName"], "alpha.pdf");
        assert!(json.get("uploadedAt").is_some());

        let summary = serde_json::to_value(DocumentSummary::from(&doc)).unwrap();
        assert_eq!(summary["chunksCount"], 1);
    }
}
