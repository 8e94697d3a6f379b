//! Infrastructure layer for vox-pilot
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the backend provider clients, configuration file
//! loading, and the JSONL transcript logger.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigLoader, FileAssistantConfig, FileBridgesConfig, FileConfig};
pub use logging::JsonlTranscriptLogger;
pub use providers::{BridgeClient, ClaudeCliClient};
