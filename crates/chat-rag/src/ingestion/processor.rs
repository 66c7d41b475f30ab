//! Upload processing: extraction followed by chunking

use crate::error::Result;

use super::chunker::TextChunker;
use super::parser::FileParser;

/// Chunks extracted from one uploaded file
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    /// Original filename
    pub filename: String,
    /// Chunk texts in order
    pub chunks: Vec<String>,
    /// Length of the extracted text in characters
    pub char_count: usize,
}

/// Turns uploaded bytes into chunk texts
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestPipeline {
    chunker: TextChunker,
}

impl IngestPipeline {
    /// Create a pipeline around a chunker
    pub fn new(chunker: TextChunker) -> Self {
        Self { chunker }
    }

    /// Extract text from `data` and chunk it
    pub fn process(
        &self,
        filename: &str,
        content_type: Option<&str>,
        data: &[u8],
    ) -> Result<ProcessedFile> {
        let text = FileParser::extract(filename, content_type, data)?;
        Ok(self.process_text(filename, &text))
    }

    /// Chunk already-extracted text
    pub fn process_text(&self, filename: &str, text: &str) -> ProcessedFile {
        let chunks = self.chunker.chunk(text);

        tracing::debug!(
            "Chunked '{}': {} chars into {} chunks",
            filename,
            text.chars().count(),
            chunks.len()
        );

        ProcessedFile {
            filename: filename.to_string(),
            char_count: text.chars().count(),
            chunks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_text_file() {
        let pipeline = IngestPipeline::new(TextChunker::new(10, 2).unwrap());
        let processed = pipeline
            .process("notes.txt", Some("text/plain"), b"abcdefghijklmnop")
            .unwrap();

        assert_eq!(processed.filename, "notes.txt");
        assert_eq!(processed.char_count, 16);
        assert_eq!(processed.chunks, vec!["abcdefghij", "ijklmnop"]);
    }

    #[test]
    fn test_empty_file_gives_no_chunks() {
        let processed = IngestPipeline::default().process_text("empty.txt", "");
        assert!(processed.chunks.is_empty());
    }

    #[test]
    fn test_rejects_unsupported() {
        let result = IngestPipeline::default().process("x.png", Some("image/png"), b"");
        assert!(result.is_err());
    }
}
