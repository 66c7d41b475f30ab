//! Generation collaborators
//!
//! Chat answers are produced by an external LLM behind the [`LlmProvider`] trait,
//! so the server can run against Gemini in production and a scripted provider in
//! tests.

pub mod gemini;
pub mod llm;

pub use gemini::GeminiClient;
pub use llm::{LlmProvider, TextStream};
