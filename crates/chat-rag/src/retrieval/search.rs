//! Lexical chunk scoring and ranking

use crate::config::RetrievalConfig;
use crate::types::{Document, ScoredChunk};

use super::matcher;

/// Lower-cased whitespace tokens longer than two characters, first occurrence kept
pub fn query_keywords(query: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for word in query.split_whitespace().map(str::to_lowercase) {
        if word.chars().count() > 2 && !keywords.contains(&word) {
            keywords.push(word);
        }
    }
    keywords
}

/// Number of `keywords` occurring anywhere in `chunk`, case-insensitively.
/// Repeats of a keyword inside the chunk do not add to the score.
pub fn score_chunk(chunk: &str, keywords: &[String]) -> usize {
    let lower = chunk.to_lowercase();
    keywords
        .iter()
        .filter(|k| lower.contains(k.as_str()))
        .count()
}

fn score_document(doc: &Document, keywords: &[String]) -> Vec<ScoredChunk> {
    doc.chunks
        .iter()
        .enumerate()
        .map(|(index, text)| ScoredChunk {
            text: text.clone(),
            score: score_chunk(text, keywords),
            filename: doc.filename.clone(),
            index,
            document_id: doc.id,
        })
        .collect()
}

/// Stable sort by score, highest first; equal scores keep encounter order
fn sort_by_score(chunks: &mut [ScoredChunk]) {
    chunks.sort_by(|a, b| b.score.cmp(&a.score));
}

/// Keyword-overlap ranker over in-memory documents
#[derive(Debug, Clone, Copy)]
pub struct LexicalSearcher {
    /// Per-document floor in balanced mode
    min_per_document: usize,
}

impl Default for LexicalSearcher {
    fn default() -> Self {
        Self {
            min_per_document: 3,
        }
    }
}

impl LexicalSearcher {
    /// Create a searcher with a balanced-mode floor
    pub fn new(min_per_document: usize) -> Self {
        Self { min_per_document }
    }

    /// Create a searcher from configuration
    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self::new(config.min_per_document)
    }

    /// Chunks taken from each document in balanced mode
    pub fn per_document_count(&self, top_k: usize, matched_docs: usize) -> usize {
        self.min_per_document
            .max(top_k.div_ceil(matched_docs.max(1)))
    }

    /// Rank chunks of `documents` against `query`.
    ///
    /// When `targets` is non-empty only documents named by a target (see
    /// [`matcher::matches`]) are considered. With more than one target and more
    /// than one matching document, every matching document contributes its own top
    /// [`per_document_count`](Self::per_document_count) chunks, so the result can be
    /// longer than `top_k`. Otherwise all chunks are pooled and the best `top_k`
    /// returned.
    pub fn search(
        &self,
        documents: &[Document],
        query: &str,
        top_k: usize,
        targets: &[String],
    ) -> Vec<ScoredChunk> {
        let keywords = query_keywords(query);

        tracing::debug!("Query: \"{}\" ({} keywords)", query, keywords.len());
        tracing::debug!("Documents in store: {}", documents.len());
        if !targets.is_empty() {
            tracing::debug!("Filtering by files: {}", targets.join(", "));
        }

        let per_doc: Vec<Vec<ScoredChunk>> = documents
            .iter()
            .filter(|doc| {
                let keep = targets.is_empty() || matcher::matches(&doc.filename, targets);
                if keep && !targets.is_empty() {
                    tracing::debug!("  matched: {}", doc.filename);
                }
                keep
            })
            .map(|doc| score_document(doc, &keywords))
            .collect();

        let result = if targets.len() > 1 && per_doc.len() > 1 {
            let take = self.per_document_count(top_k, per_doc.len());
            let mut selected: Vec<ScoredChunk> = per_doc
                .into_iter()
                .flat_map(|mut chunks| {
                    sort_by_score(&mut chunks);
                    chunks.truncate(take);
                    chunks
                })
                .collect();
            sort_by_score(&mut selected);

            tracing::debug!(
                "Multi-doc mode: {} chunks per doc, {} total",
                take,
                selected.len()
            );
            selected
        } else {
            let mut pooled: Vec<ScoredChunk> = per_doc.into_iter().flatten().collect();
            sort_by_score(&mut pooled);
            pooled.truncate(top_k);
            pooled
        };

        let mut files: Vec<&str> = result.iter().map(|c| c.filename.as_str()).collect();
        files.sort_unstable();
        files.dedup();
        tracing::info!(
            "Returning {} chunks from {} doc(s)",
            result.len(),
            files.len()
        );

        result
    }
}
