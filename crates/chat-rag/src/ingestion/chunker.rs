//! Fixed-size text chunking with overlap

use crate::config::ChunkingConfig;
use crate::error::{Error, Result};

/// Splits text into overlapping fixed-size character windows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChunker {
    /// Window size in characters
    chunk_size: usize,
    /// Characters shared by consecutive windows
    overlap: usize,
}

impl Default for TextChunker {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 200,
        }
    }
}

impl TextChunker {
    /// Create a new chunker.
    ///
    /// Fails with [`Error::InvalidConfiguration`] unless `chunk_size > overlap`, since
    /// the cursor would otherwise never advance.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::config("chunk_size must be greater than zero"));
        }
        if overlap >= chunk_size {
            return Err(Error::config(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                overlap, chunk_size
            )));
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Create a chunker from configuration
    pub fn from_config(config: &ChunkingConfig) -> Result<Self> {
        Self::new(config.chunk_size, config.chunk_overlap)
    }

    /// Window size in characters
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Overlap in characters
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Split `text` into windows of at most `chunk_size` characters.
    ///
    /// Each window starts `overlap` characters before the previous one ended. The
    /// last window may be shorter. Empty text yields no chunks.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        // Byte offset of every char, plus the end of the text.
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let len = bounds.len() - 1;

        let mut chunks = Vec::new();
        let mut start = 0usize;

        while start < len {
            let end = (start + self.chunk_size).min(len);
            chunks.push(text[bounds[start]..bounds[end]].to_string());

            // final window reached the end of the text
            if end >= len {
                break;
            }
            start = end - self.overlap;
        }

        chunks
    }
}

/// Chunk `text` with an explicit window size and overlap
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<String>> {
    Ok(TextChunker::new(chunk_size, overlap)?.chunk(text))
}
