//! Configuration for the chat service

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Upper bound on Gemini retries; backoff doubles per attempt
pub const MAX_LLM_RETRIES: u32 = 8;

/// Main chat service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// Gemini/LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,
}

impl RagConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::config(e.to_string()))
    }

    /// Apply environment overrides (`HOST`, `PORT`, `GEMINI_API_KEY`, `GEMINI_MODEL`)
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| Error::config(format!("PORT is not a valid port: {}", port)))?;
        }
        if let Some(key) = lookup("GEMINI_API_KEY").filter(|k| !k.is_empty()) {
            self.llm.api_key = Some(key);
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            self.llm.model = model;
        }
        Ok(())
    }

    /// Check cross-field invariants before the server starts
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(Error::config("chunk_size must be greater than zero"));
        }
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(Error::config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunking.chunk_overlap, self.chunking.chunk_size
            )));
        }
        if self.retrieval.top_k == 0 {
            return Err(Error::config("top_k must be greater than zero"));
        }
        if self.llm.max_retries > MAX_LLM_RETRIES {
            return Err(Error::config(format!(
                "max_retries ({}) must be at most {}",
                self.llm.max_retries, MAX_LLM_RETRIES
            )));
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum size of a single uploaded file in bytes (default: 10MB)
    pub max_file_size: usize,
    /// Maximum number of files in one batch upload
    pub max_files_per_upload: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            enable_cors: true,
            max_file_size: 10 * 1024 * 1024, // 10MB
            max_files_per_upload: 10,
        }
    }
}

impl ServerConfig {
    /// Request body limit for the batch upload route
    pub fn max_batch_body(&self) -> usize {
        self.max_file_size.saturating_mul(self.max_files_per_upload.max(1))
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Window size in characters
    pub chunk_size: usize,
    /// Overlap between consecutive windows in characters
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Chunks handed to the LLM in single-target mode
    pub top_k: usize,
    /// Per-document floor in balanced (multi-mention) mode
    pub min_per_document: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            min_per_document: 3,
        }
    }
}

/// LLM (Gemini) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Gemini API base URL
    pub base_url: String,
    /// Generation model name
    pub model: String,
    /// API key; normally supplied through `GEMINI_API_KEY`
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries for failed non-streaming requests
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key: None,
            temperature: 0.3,
            timeout_secs: 120,
            max_retries: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = RagConfig::default();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.chunking.chunk_size, 1000);
        assert_eq!(config.chunking.chunk_overlap, 200);
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.llm.model, "gemini-2.5-flash");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config = RagConfig::from_toml(
            r#"
            [server]
            port = 8080

            [chunking]
            chunk_size = 500
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.chunking.chunk_size, 500);
        assert_eq!(config.chunking.chunk_overlap, 200);
    }

    #[test]
    fn test_retries_are_bounded() {
        let mut config = RagConfig::default();
        config.llm.max_retries = MAX_LLM_RETRIES;
        assert!(config.validate().is_ok());

        config.llm.max_retries = 64;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_overlap_must_be_smaller_than_chunk() {
        let mut config = RagConfig::default();
        config.chunking.chunk_overlap = 1000;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PORT", "4000"),
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_MODEL", "gemini-2.5-pro"),
        ]
        .into_iter()
        .collect();

        let mut config = RagConfig::default();
        config
            .apply_overrides(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.llm.api_key.as_deref(), Some("secret"));
        assert_eq!(config.llm.model, "gemini-2.5-pro");
    }

    #[test]
    fn test_bad_port_is_rejected() {
        let mut config = RagConfig::default();
        let result = config.apply_overrides(|k| (k == "PORT").then(|| "nope".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_api_key_not_serialized() {
        let mut config = RagConfig::default();
        config.llm.api_key = Some("secret".to_string());
        let rendered = toml::to_string(&config).unwrap();
        assert!(!rendered.contains("secret"));
    }
}
