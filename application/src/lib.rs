//! Application layer for vox-pilot
//!
//! This crate contains the orchestration use cases and the port definitions
//! the infrastructure layer implements. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::OrchestratorSettings;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    provider_client::{
        ProgressCallback, ProgressUpdate, ProviderClient, ProviderClientError, ProviderReply,
    },
    speech::{NoSpeech, SpeechSynthesizer},
    ui_event::{EventChannel, UiEvent},
};
pub use use_cases::gateway::ProviderGateway;
pub use use_cases::orchestrator::{AssistantOrchestrator, OrchestratorError};
