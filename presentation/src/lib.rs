//! Presentation layer for vox-pilot
//!
//! Console rendering of the orchestrator's event stream, a stand-in for
//! the external speech synthesizer, the interactive REPL, and the clap CLI
//! definition. No business logic lives here.

pub mod chat;
pub mod cli;
pub mod output;
pub mod speech;

// Re-export commonly used types
pub use chat::AssistantRepl;
pub use cli::Cli;
pub use output::ConsoleRenderer;
pub use speech::ConsoleSpeech;
