//! Document ingestion: text extraction and chunking

mod chunker;
mod parser;
mod processor;

pub use chunker::{chunk_text, TextChunker};
pub use parser::FileParser;
pub use processor::{IngestPipeline, ProcessedFile};
