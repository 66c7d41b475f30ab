//! Chat request types

use serde::{Deserialize, Serialize};

/// Chat request, shared by the plain and streaming chat routes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The user's question, possibly containing `@mentions`
    #[serde(default)]
    pub query: String,

    /// Session to record the exchange under (optional)
    #[serde(default)]
    pub session_id: Option<String>,
}

impl ChatRequest {
    /// Create a new request
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            session_id: None,
        }
    }

    /// Record the exchange under a session
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Session id, ignoring empty strings
    pub fn session(&self) -> Option<&str> {
        self.session_id.as_deref().filter(|s| !s.is_empty())
    }
}
