//! Configuration file structure.
//!
//! Serde-backed TOML sections with defaults, merged by the
//! [`ConfigLoader`](super::loader::ConfigLoader).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vox_domain::{DomainError, ProviderId};

/// Default base URL of the ChatGPT bridge service.
pub const DEFAULT_CHATGPT_URL: &str = "http://127.0.0.1:8765";

/// Default base URL of the Gemini bridge service.
pub const DEFAULT_GEMINI_URL: &str = "http://127.0.0.1:8766";

/// Complete file configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub assistant: FileAssistantConfig,
    pub claude: FileClaudeConfig,
    pub bridges: FileBridgesConfig,
    pub transcript: FileTranscriptConfig,
}

impl FileConfig {
    /// Parse the configured preferred provider.
    pub fn preferred_provider(&self) -> Result<ProviderId, DomainError> {
        self.assistant.preferred_provider.parse()
    }
}

/// `[assistant]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAssistantConfig {
    /// First provider in the fallback chain.
    pub preferred_provider: String,
}

impl Default for FileAssistantConfig {
    fn default() -> Self {
        Self {
            preferred_provider: ProviderId::Claude.as_str().to_string(),
        }
    }
}

/// `[claude]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileClaudeConfig {
    /// Name or path of the CLI binary.
    pub command: String,
}

impl Default for FileClaudeConfig {
    fn default() -> Self {
        Self {
            command: "claude".to_string(),
        }
    }
}

/// `[bridges]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBridgesConfig {
    pub chatgpt_url: String,
    pub gemini_url: String,
}

impl Default for FileBridgesConfig {
    fn default() -> Self {
        Self {
            chatgpt_url: DEFAULT_CHATGPT_URL.to_string(),
            gemini_url: DEFAULT_GEMINI_URL.to_string(),
        }
    }
}

/// `[transcript]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTranscriptConfig {
    /// Write a JSONL transcript of the conversation.
    pub enabled: bool,
    /// Transcript file path; defaults to the platform data directory.
    pub path: Option<PathBuf>,
}
