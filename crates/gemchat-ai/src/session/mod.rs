//! Conversation session management.
//!
//! A `ConversationSession` owns the transcript and the pending attachment
//! slot, and runs one request/response exchange per submitted turn.

mod chat;
mod manager;


pub use manager::ConversationSession;
