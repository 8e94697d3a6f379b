//! Configuration file handling.

pub mod file_config;
pub mod loader;

pub use file_config::{
    FileAssistantConfig, FileBridgesConfig, FileClaudeConfig, FileConfig, FileTranscriptConfig,
};
pub use loader::ConfigLoader;
