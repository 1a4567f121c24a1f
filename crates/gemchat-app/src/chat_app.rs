//! Terminal adapter around a conversation session.
//!
//! Turns parsed REPL commands into session calls and describes the result
//! as an [`Outcome`] for `main` to print.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use gemchat_ai::{AiClient, Attachment, ChatError, ConversationSession, Role};

use crate::commands::{Command, HELP};

/// What the front end should show after handling one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The model's answer, not yet printed.
    Answer(String),
    /// The answer was already printed chunk by chunk.
    Streamed,
    /// Shown in place of the answer.
    Error(String),
    Info(String),
    Quit,
    Nothing,
}

pub struct ChatApp {
    session: ConversationSession,
    client: Arc<dyn AiClient>,
    stream: bool,
}

impl ChatApp {
    pub fn new(client: Arc<dyn AiClient>, stream: bool) -> Self {
        Self {
            session: ConversationSession::new(),
            client,
            stream,
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    pub async fn handle(&mut self, command: Command) -> Outcome {
        match command {
            Command::Send(text) => self.send(&text).await,
            Command::Attach(path) => match self.attach_file(&path) {
                Ok(mime) => Outcome::Info(format!("attached {} ({mime})", path.display())),
                Err(e) => Outcome::Error(e.to_string()),
            },
            Command::Detach => match self.session.clear_attachment() {
                Some(_) => Outcome::Info("attachment removed".into()),
                None => Outcome::Info("nothing attached".into()),
            },
            Command::History => Outcome::Info(self.history()),
            Command::Help => Outcome::Info(HELP.to_string()),
            Command::Quit => Outcome::Quit,
            Command::Empty => Outcome::Nothing,
            Command::Invalid(hint) => Outcome::Error(hint),
        }
    }

    /// Buffer a file for the next message; returns its MIME type.
    pub fn attach_file(&mut self, path: &Path) -> Result<String, ChatError> {
        let attachment = Attachment::from_path(path)?;
        let mime = attachment.mime_type.clone();
        self.session.attach(attachment);
        Ok(mime)
    }

    pub async fn send(&mut self, text: &str) -> Outcome {
        let result = if self.stream {
            let on_chunk = Box::new(|chunk: String| {
                let mut stdout = std::io::stdout().lock();
                let _ = write!(stdout, "{chunk}");
                let _ = stdout.flush();
            });
            self.session
                .submit_streaming(self.client.as_ref(), text, None, on_chunk)
                .await
                .map(|_| Outcome::Streamed)
        } else {
            self.session
                .submit(self.client.as_ref(), text, None)
                .await
                .map(Outcome::Answer)
        };

        result.unwrap_or_else(|e| Outcome::Error(e.to_string()))
    }

    /// Transcript as `you:` / `model:` lines.
    pub fn history(&self) -> String {
        if self.session.turn_count() == 0 {
            return "(no messages yet)".into();
        }

        let mut out = Vec::with_capacity(self.session.turn_count());
        for turn in self.session.transcript() {
            let who = match turn.role {
                Role::User => "you",
                Role::Model => "model",
            };
            let mut line = format!("{who}: {}", turn.text());
            for attachment in turn.attachments() {
                line.push_str(&format!(" [{}]", attachment.mime_type));
            }
            out.push(line);
        }
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gemchat_ai::{ModelReply, Turn};

    /// Answers with the number of turns it received, or fails on "fail".
    struct CountingClient;

    #[async_trait]
    impl AiClient for CountingClient {
        async fn generate(&self, contents: &[Turn]) -> Result<ModelReply, ChatError> {
            let last = contents.last().map(Turn::text).unwrap_or_default();
            if last == "fail" {
                return Err(ChatError::RequestFailed("bad key".into()));
            }
            Ok(ModelReply {
                text: format!("**seen** {} turns", contents.len()),
                ..ModelReply::default()
            })
        }

        async fn generate_streaming(
            &self,
            contents: &[Turn],
            _on_chunk: Box<dyn Fn(String) + Send + Sync>,
        ) -> Result<ModelReply, ChatError> {
            self.generate(contents).await
        }
    }

    fn app() -> ChatApp {
        ChatApp::new(Arc::new(CountingClient), false)
    }

    #[tokio::test]
    async fn send_returns_cleaned_answer() {
        let mut app = app();
        let outcome = app.handle(Command::Send("hi".into())).await;
        assert_eq!(outcome, Outcome::Answer("seen 1 turns".into()));
    }

    #[tokio::test]
    async fn failure_is_shown_in_place_of_the_answer() {
        let mut app = app();
        let outcome = app.handle(Command::Send("fail".into())).await;
        assert_eq!(outcome, Outcome::Error("bad key".into()));
        assert_eq!(app.session().turn_count(), 1);
    }

    #[tokio::test]
    async fn attach_then_send_includes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "hello").unwrap();

        let mut app = app();
        let outcome = app.handle(Command::Attach(path)).await;
        assert!(matches!(outcome, Outcome::Info(ref m) if m.contains("text/plain")));

        app.handle(Command::Send("read this".into())).await;
        let user = &app.session().transcript()[0];
        assert_eq!(user.attachments().count(), 1);
        assert!(app.session().pending_attachment().is_none());
    }

    #[tokio::test]
    async fn attach_missing_file_is_an_error() {
        let mut app = app();
        let outcome = app
            .handle(Command::Attach("/tmp/gemchat_missing_attachment.png".into()))
            .await;
        assert!(matches!(outcome, Outcome::Error(_)));
        assert!(app.session().pending_attachment().is_none());
    }

    #[tokio::test]
    async fn detach_clears_the_slot() {
        let mut app = app();
        app.session.attach(Attachment::new("AAAA", "image/png"));
        assert_eq!(
            app.handle(Command::Detach).await,
            Outcome::Info("attachment removed".into())
        );
        assert_eq!(
            app.handle(Command::Detach).await,
            Outcome::Info("nothing attached".into())
        );
    }

    #[tokio::test]
    async fn history_lists_turns_in_order() {
        let mut app = app();
        assert_eq!(app.history(), "(no messages yet)");

        app.handle(Command::Send("one".into())).await;
        app.handle(Command::Send("two".into())).await;

        assert_eq!(
            app.history(),
            "you: one\nmodel: seen 1 turns\nyou: two\nmodel: seen 3 turns"
        );
    }

    #[tokio::test]
    async fn empty_and_quit_need_no_request() {
        let mut app = app();
        assert_eq!(app.handle(Command::Empty).await, Outcome::Nothing);
        assert_eq!(app.handle(Command::Quit).await, Outcome::Quit);
        assert_eq!(app.session().turn_count(), 0);
    }
}
