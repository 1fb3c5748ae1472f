//! Chat-completions boundary.
//!
//! All three language-model collaborators (memo extraction, query
//! generation, answer rendering) speak the same OpenAI-compatible chat
//! protocol. [`LanguageModel`] is the seam the rest of the crate works
//! against; [`ChatClient`] is the HTTP implementation.

mod chat;

use async_trait::async_trait;
use serde::Serialize;

pub use chat::ChatClient;

/// Error type for language-model calls.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("API error: HTTP {status} — {message}")]
    Api { status: u16, message: String },

    /// The endpoint answered successfully but with no usable content.
    #[error("empty response from language model")]
    EmptyResponse,
}

/// Result type for language-model calls.
pub type LlmResult<T> = std::result::Result<T, LlmError>;

/// Speaker role in a chat conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// A chat-completions language model.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send the conversation and return the assistant's reply text.
    async fn chat(&self, messages: &[ChatMessage]) -> LlmResult<String>;
}

/// Strip a single enclosing Markdown code fence from model output.
///
/// Handles both bare fences and language-tagged ones (```json); text without
/// a fence is returned trimmed.
pub fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        let after = after.strip_prefix("json").unwrap_or(after);
        if let Some(end) = after.find("```") {
            return after[..end].trim().to_string();
        }
    }
    trimmed.to_string()
}
