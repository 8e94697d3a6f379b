//! Speech synthesis port
//!
//! Text-to-speech is an external collaborator; the core only sequences
//! spoken notices through this interface and never depends on playback for
//! correctness.

use async_trait::async_trait;

/// Speaks short notices and answer excerpts.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak the text, resolving when playback has been handed off.
    async fn speak(&self, text: &str);
}

/// No-op synthesizer for tests and muted sessions.
pub struct NoSpeech;

#[async_trait]
impl SpeechSynthesizer for NoSpeech {
    async fn speak(&self, _text: &str) {}
}
