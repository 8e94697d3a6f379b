//! Conversation history: turns and the append-only session.

pub mod entities;

pub use entities::{ConversationSession, ConversationTurn, Role};
