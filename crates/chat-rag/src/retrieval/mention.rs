//! `@mention` parsing

use regex::Regex;
use std::sync::OnceLock;

fn mention_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"@([^\s@]+)").expect("Invalid regex"))
}

/// A query split into its `@mentions` and the remaining text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentionQuery {
    /// Lower-cased mention tokens, in query order, without the `@`
    pub mentions: Vec<String>,
    /// Query with the mention tokens removed
    pub clean_query: String,
}

impl MentionQuery {
    /// Whether any document was mentioned
    pub fn has_mentions(&self) -> bool {
        !self.mentions.is_empty()
    }

    /// Text to retrieve with: the clean query, or `original` when nothing is left
    pub fn retrieval_text<'a>(&'a self, original: &'a str) -> &'a str {
        if self.clean_query.is_empty() {
            original
        } else {
            &self.clean_query
        }
    }
}

/// Extract `@name` tokens from `query`.
///
/// A mention is `@` followed by one or more characters that are neither whitespace
/// nor `@`. Removing mentions can leave gaps, so the clean query has its whitespace
/// collapsed; without mentions it is just the trimmed query.
pub fn parse_mentions(query: &str) -> MentionQuery {
    let pattern = mention_pattern();

    let mentions: Vec<String> = pattern
        .captures_iter(query)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_lowercase())
        .collect();

    let clean_query = if mentions.is_empty() {
        query.trim().to_string()
    } else {
        pattern
            .replace_all(query, "")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    };

    tracing::debug!(
        "Parsed mentions: {}",
        if mentions.is_empty() {
            "none".to_string()
        } else {
            mentions.join(", ")
        }
    );

    MentionQuery {
        mentions,
        clean_query,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mentions_before_question() {
        let parsed = parse_mentions("@a @b hello");
        assert_eq!(parsed.mentions, vec!["a", "b"]);
        assert_eq!(parsed.clean_query, "hello");
    }

    #[test]
    fn test_no_mentions() {
        let parsed = parse_mentions("no mentions here");
        assert!(parsed.mentions.is_empty());
        assert_eq!(parsed.clean_query, "no mentions here");

        let parsed = parse_mentions("  padded   query ");
        assert_eq!(parsed.clean_query, "padded   query");
    }

    #[test]
    fn test_mentions_are_lowercased() {
        let parsed = parse_mentions("compare @Q3_Report.pdf and @Budget-2024 please");
        assert_eq!(parsed.mentions, vec!["q3_report.pdf", "budget-2024"]);
        assert_eq!(parsed.clean_query, "compare and please");
    }

    #[test]
    fn test_adjacent_mentions_split_on_at() {
        let parsed = parse_mentions("@alpha@beta what?");
        assert_eq!(parsed.mentions, vec!["alpha", "beta"]);
        assert_eq!(parsed.clean_query, "what?");
    }

    #[test]
    fn test_lone_at_is_not_a_mention() {
        let parsed = parse_mentions("email me @ noon");
        assert!(parsed.mentions.is_empty());
        assert_eq!(parsed.clean_query, "email me @ noon");
    }

    #[test]
    fn test_retrieval_text_falls_back_to_original() {
        let parsed = parse_mentions("@alpha");
        assert_eq!(parsed.mentions, vec!["alpha"]);
        assert_eq!(parsed.clean_query, "");
        assert_eq!(parsed.retrieval_text("@alpha"), "@alpha");

        let parsed = parse_mentions("@alpha revenue");
        assert_eq!(parsed.retrieval_text("@alpha revenue"), "revenue");
    }

    #[test]
    fn test_duplicate_mentions_are_kept() {
        let parsed = parse_mentions("@a @a x");
        assert_eq!(parsed.mentions, vec!["a", "a"]);
    }
}
