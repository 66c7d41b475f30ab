//! Answer generation: prompt assembly and the chat pipeline

pub mod chat;
pub mod prompt;

pub use chat::{answer, PreparedChat};
pub use prompt::PromptBuilder;
