//! In-memory document registry capped at [`MAX_DOCUMENTS`]

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::retrieval::LexicalSearcher;
use crate::types::{Document, ScoredChunk};

/// Maximum number of documents held at once
pub const MAX_DOCUMENTS: usize = 5;

/// Uploaded documents in upload order.
///
/// The store is not synchronized itself; the server keeps it behind one lock so
/// that retrieval never sees a half-applied delete.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: Vec<Document>,
}

impl DocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Whether another document can be added
    pub fn has_capacity(&self) -> bool {
        self.documents.len() < MAX_DOCUMENTS
    }

    /// Fail with [`Error::CapacityExceeded`] when the store is full
    pub fn ensure_capacity(&self) -> Result<()> {
        if self.has_capacity() {
            Ok(())
        } else {
            Err(Error::CapacityExceeded { max: MAX_DOCUMENTS })
        }
    }

    /// Total chunks across all documents
    pub fn total_chunks(&self) -> usize {
        self.documents.iter().map(Document::chunk_count).sum()
    }

    /// All documents in upload order
    pub fn list_documents(&self) -> &[Document] {
        &self.documents
    }

    /// Store a new document built from `chunks`
    pub fn add_document(&mut self, filename: impl Into<String>, chunks: Vec<String>) -> Result<&Document> {
        self.insert(Document::new(filename, chunks))
    }

    /// Store an already-built document
    pub fn insert(&mut self, doc: Document) -> Result<&Document> {
        self.ensure_capacity()?;

        tracing::info!(
            "Stored document '{}' ({} chunks, {}/{} slots used)",
            doc.filename,
            doc.chunk_count(),
            self.documents.len() + 1,
            MAX_DOCUMENTS
        );

        self.documents.push(doc);
        Ok(&self.documents[self.documents.len() - 1])
    }

    fn position(&self, id: &str) -> Option<usize> {
        let id = Uuid::parse_str(id).ok()?;
        self.documents.iter().position(|d| d.id == id)
    }

    /// Get a document by ID
    pub fn get_document(&self, id: &str) -> Result<&Document> {
        self.position(id)
            .map(|i| &self.documents[i])
            .ok_or_else(|| Error::DocumentNotFound(id.to_string()))
    }

    /// Remove a document, keeping the others in upload order
    pub fn delete_document(&mut self, id: &str) -> Result<Document> {
        let index = self
            .position(id)
            .ok_or_else(|| Error::DocumentNotFound(id.to_string()))?;
        let removed = self.documents.remove(index);

        tracing::info!("Deleted document: {}", removed.filename);
        Ok(removed)
    }

    /// Rank stored chunks against `query`, optionally restricted to `targets`.
    ///
    /// Fails with [`Error::NoDocuments`] when nothing has been uploaded.
    pub fn retrieve(
        &self,
        searcher: &LexicalSearcher,
        query: &str,
        top_k: usize,
        targets: &[String],
    ) -> Result<Vec<ScoredChunk>> {
        if self.documents.is_empty() {
            return Err(Error::NoDocuments);
        }
        Ok(searcher.search(&self.documents, query, top_k, targets))
    }
}
