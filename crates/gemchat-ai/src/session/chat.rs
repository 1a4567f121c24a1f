//! Async exchange methods for ConversationSession (submit + streaming).

use gemchat_common::new_correlation_id;
use tracing::{debug, warn};

use crate::attachment::Attachment;
use crate::{AiClient, ChatError};

use super::manager::ConversationSession;

impl ConversationSession {
    /// Add a user turn, send the whole transcript, and return the model's
    /// answer with bold markup stripped.
    ///
    /// On failure the user turn stays in the transcript and no model turn
    /// is added. The request is never retried here; transient transport
    /// failures are retried by the client.
    pub async fn submit(
        &mut self,
        client: &dyn AiClient,
        text: &str,
        attachment: Option<Attachment>,
    ) -> Result<String, ChatError> {
        self.push_user_turn(text, attachment)?;

        let request_id = new_correlation_id();
        debug!(session = %self.id, request = %request_id, turns = self.transcript.len(), "Submitting turn");

        let reply = client.generate(&self.transcript).await.inspect_err(|e| {
            warn!(session = %self.id, request = %request_id, error = %e, "Exchange failed");
        })?;

        Ok(self.push_model_turn(&reply.text, &reply.usage))
    }

    /// Same as [`ConversationSession::submit`], forwarding raw text chunks
    /// to `on_chunk` as they stream in.
    pub async fn submit_streaming(
        &mut self,
        client: &dyn AiClient,
        text: &str,
        attachment: Option<Attachment>,
        on_chunk: Box<dyn Fn(String) + Send + Sync>,
    ) -> Result<String, ChatError> {
        self.push_user_turn(text, attachment)?;

        let request_id = new_correlation_id();
        debug!(session = %self.id, request = %request_id, turns = self.transcript.len(), "Submitting turn (streaming)");

        let reply = client
            .generate_streaming(&self.transcript, on_chunk)
            .await
            .inspect_err(|e| {
                warn!(session = %self.id, request = %request_id, error = %e, "Exchange failed");
            })?;

        Ok(self.push_model_turn(&reply.text, &reply.usage))
    }
}
