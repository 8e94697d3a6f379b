//! Outbound UI events.
//!
//! The core reports everything user-visible through a bounded channel of
//! tagged events and has no other dependency on the presentation layer.
//! Delivery is best-effort: if the channel is full the event is dropped
//! with a warning, never blocking request processing.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

/// Events emitted by the orchestrator for the presentation layer to render.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Assistant mode became active.
    ModeActivated,
    /// Assistant mode was left; queued requests were discarded.
    ModeDeactivated,
    /// A request arrived while busy and was queued (1-based position).
    Queued { position: usize, text: String },
    /// A queued request was popped and is now being processed.
    Processing { text: String, remaining: usize },
    /// A backend is working on the current request.
    Thinking,
    /// The backend chain walk ended (successfully or not).
    ThinkingDone,
    /// Periodic progress during a long backend call.
    Progress { elapsed: Duration, status: String },
    /// The user's request text, echoed for display.
    UserMessage { content: String },
    /// The assistant's full answer.
    AssistantMessage { content: String, elapsed: Duration },
    /// The current backend failed; the next one in the chain is being tried.
    SwitchingProvider { attempt: usize },
    /// A user-visible (brand-scrubbed) error.
    Error { message: String },
    /// Queue, history, and backend sessions were cleared.
    SessionReset,
}

impl UiEvent {
    /// Stable action tag for transcripts and logs.
    pub fn action(&self) -> &'static str {
        match self {
            UiEvent::ModeActivated => "mode-activated",
            UiEvent::ModeDeactivated => "mode-deactivated",
            UiEvent::Queued { .. } => "queued",
            UiEvent::Processing { .. } => "processing",
            UiEvent::Thinking => "thinking",
            UiEvent::ThinkingDone => "thinking-done",
            UiEvent::Progress { .. } => "progress",
            UiEvent::UserMessage { .. } => "user-message",
            UiEvent::AssistantMessage { .. } => "assistant-message",
            UiEvent::SwitchingProvider { .. } => "switching-provider",
            UiEvent::Error { .. } => "error",
            UiEvent::SessionReset => "session-reset",
        }
    }
}

/// Sending half of the bounded outbound event channel.
#[derive(Clone)]
pub struct EventChannel {
    tx: mpsc::Sender<UiEvent>,
}

impl EventChannel {
    /// Create a channel with the given capacity, returning the sender and
    /// the receiver the presentation layer drains.
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<UiEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Emit an event without blocking.
    pub fn emit(&self, event: UiEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!(action = event.action(), "ui event channel full, dropping event");
            }
            Err(TrySendError::Closed(event)) => {
                debug!(action = event.action(), "ui event channel closed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emit_delivers_events_in_order() {
        let (channel, mut rx) = EventChannel::bounded(8);
        channel.emit(UiEvent::Thinking);
        channel.emit(UiEvent::ThinkingDone);

        assert_eq!(rx.recv().await.unwrap(), UiEvent::Thinking);
        assert_eq!(rx.recv().await.unwrap(), UiEvent::ThinkingDone);
    }

    #[tokio::test]
    async fn test_emit_never_blocks_when_full() {
        let (channel, mut rx) = EventChannel::bounded(1);
        channel.emit(UiEvent::Thinking);
        // Channel is full — this drops the event instead of blocking.
        channel.emit(UiEvent::ThinkingDone);

        assert_eq!(rx.recv().await.unwrap(), UiEvent::Thinking);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_emit_after_receiver_dropped_is_harmless() {
        let (channel, rx) = EventChannel::bounded(1);
        drop(rx);
        channel.emit(UiEvent::SessionReset);
    }

    #[test]
    fn test_action_tags() {
        assert_eq!(
            UiEvent::Queued {
                position: 1,
                text: "hi".to_string()
            }
            .action(),
            "queued"
        );
        assert_eq!(UiEvent::SessionReset.action(), "session-reset");
    }
}
