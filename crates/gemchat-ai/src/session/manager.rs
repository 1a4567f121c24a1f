//! Session struct, transcript access and the pending attachment slot.

use gemchat_common::SessionId;
use tracing::debug;

use crate::attachment::Attachment;
use crate::{ChatError, Part, TokenUsage, Turn};

/// A conversation with an append-only transcript.
///
/// The transcript is never truncated: every request carries all turns so far.
pub struct ConversationSession {
    pub(super) id: SessionId,
    /// Ordered turn history, oldest first.
    pub(super) transcript: Vec<Turn>,
    /// File buffered for the next user turn.
    pub(super) pending: Option<Attachment>,
    /// Token usage summed over successful exchanges.
    pub(super) usage: TokenUsage,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            transcript: Vec::new(),
            pending: None,
            usage: TokenUsage::default(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Buffer a file for the next submitted turn, replacing any earlier one.
    pub fn attach(&mut self, attachment: Attachment) {
        debug!(session = %self.id, mime = %attachment.mime_type, "Attachment buffered");
        self.pending = Some(attachment);
    }

    /// Drop the buffered file, returning it if there was one.
    pub fn clear_attachment(&mut self) -> Option<Attachment> {
        self.pending.take()
    }

    pub fn pending_attachment(&self) -> Option<&Attachment> {
        self.pending.as_ref()
    }

    /// Get the full conversation history.
    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    /// Number of turns in history.
    pub fn turn_count(&self) -> usize {
        self.transcript.len()
    }

    pub fn usage(&self) -> &TokenUsage {
        &self.usage
    }

    /// Validate the input and append the user turn.
    ///
    /// An explicit attachment wins over the buffered one; the slot is empty
    /// afterwards either way. Nothing changes on `EmptyInput`.
    pub(super) fn push_user_turn(
        &mut self,
        text: &str,
        attachment: Option<Attachment>,
    ) -> Result<(), ChatError> {
        let text = text.trim();
        if text.is_empty() && attachment.is_none() && self.pending.is_none() {
            return Err(ChatError::EmptyInput);
        }

        let buffered = self.pending.take();
        let attachment = attachment.or(buffered);

        let mut parts = Vec::with_capacity(2);
        if !text.is_empty() {
            parts.push(Part::text(text));
        }
        if let Some(attachment) = attachment {
            parts.push(attachment.into());
        }

        self.transcript.push(Turn::user(parts));
        Ok(())
    }

    /// Append the model turn for a successful reply and return its text.
    pub(super) fn push_model_turn(&mut self, raw_text: &str, usage: &TokenUsage) -> String {
        let text = crate::markdown::strip_bold(raw_text);
        self.transcript.push(Turn::model(text.clone()));
        self.usage.add(usage);
        text
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}
