//! Prompt templates for document chat

use crate::types::ScoredChunk;

/// Prompt builder for chat queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build context from ranked chunks, one `[From file]: text` entry per chunk
    pub fn build_context(chunks: &[ScoredChunk]) -> String {
        chunks
            .iter()
            .map(|c| format!("[From {}]: {}", c.filename, c.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Line naming the documents the user targeted, empty without mentions
    fn file_context(mentions: &[String]) -> String {
        if mentions.is_empty() {
            String::new()
        } else {
            format!(
                "The user is specifically asking about: {}.",
                mentions.join(", ")
            )
        }
    }

    /// Build the full chat prompt
    pub fn build_chat_prompt(question: &str, context: &str, mentions: &[String]) -> String {
        format!(
            r#"You are a helpful assistant that answers questions based on the provided document context.
{file_context}

Context from uploaded documents:
{context}

User question: {question}

Please provide a helpful, accurate answer based on the context above. If the context doesn't contain relevant information, say so clearly."#,
            file_context = Self::file_context(mentions),
            context = context,
            question = question,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn chunk(file: &str, text: &str) -> ScoredChunk {
        ScoredChunk {
            text: text.to_string(),
            score: 1,
            filename: file.to_string(),
            index: 0,
            document_id: Uuid::nil(),
        }
    }

    #[test]
    fn test_build_context() {
        let context = PromptBuilder::build_context(&[
            chunk("alpha.pdf", "revenue grew"),
            chunk("beta.txt", "headcount"),
        ]);
        assert_eq!(
            context,
            "[From alpha.pdf]: revenue grew\n\n[From beta.txt]: headcount"
        );
        assert_eq!(PromptBuilder::build_context(&[]), "");
    }

    #[test]
    fn test_prompt_with_mentions() {
        let prompt = PromptBuilder::build_chat_prompt(
            "@alpha @beta compare",
            "[From alpha.pdf]: x",
            &["alpha".to_string(), "beta".to_string()],
        );
        assert!(prompt.contains("The user is specifically asking about: alpha, beta.\n"));
        assert!(prompt.contains("Context from uploaded documents:\n[From alpha.pdf]: x\n"));
        assert!(prompt.contains("User question: @alpha @beta compare\n"));
    }

    #[test]
    fn test_prompt_without_mentions() {
        let prompt = PromptBuilder::build_chat_prompt("hello", "ctx", &[]);
        assert!(!prompt.contains("specifically asking"));
        assert!(prompt.starts_with(
            "You are a helpful assistant that answers questions based on the provided document context.\n\n"
        ));
        assert!(prompt.ends_with("say so clearly."));
    }
}
