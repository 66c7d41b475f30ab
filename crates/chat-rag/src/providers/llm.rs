//! LLM provider trait for answer generation

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::Result;

/// Incremental answer text
pub type TextStream = BoxStream<'static, Result<String>>;

/// Trait for LLM-based answer generation
///
/// Implementations:
/// - `GeminiClient`: Google Gemini REST API (gemini-2.5-flash)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a complete answer for a finished prompt
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Generate an answer as a stream of text pieces
    async fn complete_stream(&self, prompt: &str) -> Result<TextStream>;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
