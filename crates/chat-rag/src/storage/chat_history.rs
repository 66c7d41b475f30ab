//! Per-session chat history

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Author of a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person asking
    User,
    /// The generated answer
    Assistant,
}

/// One message in a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Append-only chat transcripts keyed by session id.
///
/// Sessions are created on their first turn and are never evicted.
#[derive(Debug, Default)]
pub struct ChatHistory {
    sessions: DashMap<String, Vec<ChatTurn>>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one turn to a session
    pub fn append_turn(&self, session_id: &str, role: Role, content: impl Into<String>) {
        self.sessions
            .entry(session_id.to_string())
            .or_default()
            .push(ChatTurn {
                role,
                content: content.into(),
            });
    }

    /// Append a question and its answer as adjacent turns
    pub fn append_exchange(&self, session_id: &str, question: &str, answer: &str) {
        let mut turns = self.sessions.entry(session_id.to_string()).or_default();
        turns.push(ChatTurn::user(question));
        turns.push(ChatTurn::assistant(answer));
    }

    /// Turns of a session; empty for an unknown session
    pub fn history(&self, session_id: &str) -> Vec<ChatTurn> {
        self.sessions
            .get(session_id)
            .map(|turns| turns.clone())
            .unwrap_or_default()
    }

    /// Number of sessions seen
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
