//! Prints spoken lines instead of synthesizing audio.
//!
//! Speech synthesis is an external collaborator of the core; this adapter
//! stands in for it on the console so the spoken-notice flow is visible.

use async_trait::async_trait;
use colored::Colorize;
use vox_application::ports::speech::SpeechSynthesizer;

/// Console stand-in for the TTS collaborator.
#[derive(Default)]
pub struct ConsoleSpeech;

impl ConsoleSpeech {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SpeechSynthesizer for ConsoleSpeech {
    async fn speak(&self, text: &str) {
        println!("{}", format!("[voice] {text}").magenta().italic());
    }
}
