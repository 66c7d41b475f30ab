//! Retrieval core: mention parsing, document matching and lexical ranking

pub mod matcher;
pub mod mention;
pub mod search;

pub use matcher::matches;
pub use mention::{parse_mentions, MentionQuery};
pub use search::{query_keywords, score_chunk, LexicalSearcher};
