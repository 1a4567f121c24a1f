//! Conversation core for gemchat.
//!
//! Provides the Gemini `generateContent` client and the conversation
//! session that owns the transcript:
//! - Turn/Part data model matching the API wire format
//! - Blocking and SSE-streamed generation
//! - Timeouts and retry of transient failures
//! - Inline attachments (base64 file data)
//! - Markdown bold cleanup of model answers

pub mod attachment;
pub mod gemini;
pub mod markdown;
pub mod session;
pub mod streaming;
pub mod types;

use async_trait::async_trait;

pub use attachment::Attachment;
pub use gemini::{GeminiClient, GeminiConfig};
pub use markdown::strip_bold;
pub use session::ConversationSession;
pub use types::{Part, Role, Turn};

/// A backend that turns a transcript into the model's next reply.
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Send the whole transcript and return the model's reply.
    async fn generate(&self, contents: &[Turn]) -> Result<ModelReply, ChatError>;

    /// Like [`AiClient::generate`], calling `on_chunk` with each text
    /// fragment as it arrives. The returned reply holds the full text.
    async fn generate_streaming(
        &self,
        contents: &[Turn],
        on_chunk: Box<dyn Fn(String) + Send + Sync>,
    ) -> Result<ModelReply, ChatError>;
}

/// Raw model output for one exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelReply {
    pub text: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub candidate_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.prompt_tokens.saturating_add(self.candidate_tokens)
    }

    pub(crate) fn add(&mut self, other: &TokenUsage) {
        self.prompt_tokens = self.prompt_tokens.saturating_add(other.prompt_tokens);
        self.candidate_tokens = self.candidate_tokens.saturating_add(other.candidate_tokens);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// Network failure, non-2xx status or malformed response. The message
    /// is the server's `error.message` when it sent one.
    #[error("{0}")]
    RequestFailed(String),
    #[error("request timed out")]
    Timeout,
    #[error("nothing to send: message is empty and no file is attached")]
    EmptyInput,
    #[error("attachment error: {0}")]
    Attachment(String),
}
