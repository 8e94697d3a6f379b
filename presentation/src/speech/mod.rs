//! Console stand-in for the external speech synthesizer.

pub mod console_speech;

pub use console_speech::ConsoleSpeech;
