//! Provider client port
//!
//! Defines the interface for talking to one answer backend. Implementations
//! (the Claude CLI subprocess, the browser bridge HTTP services) live in the
//! infrastructure layer.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use vox_domain::ProviderId;

/// Errors that can occur while calling a backend.
///
/// These are transport-level failures; a backend that *answers* with an
/// error embedded in its content is handled by attempt classification, not
/// here.
#[derive(Error, Debug)]
pub enum ProviderClientError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Process error: {0}")]
    Process(String),

    #[error("Timed out after {0} seconds")]
    Timeout(u64),
}

/// A successful raw reply from a backend, before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderReply {
    pub content: String,
    pub elapsed: Duration,
}

/// Progress report during a long-running call.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub elapsed: Duration,
    /// Latest observed status line.
    pub status: String,
}

/// Callback invoked zero or more times while a call is in flight.
///
/// A UX aid only: implementations must never block the call on it and
/// correctness never depends on it firing.
pub type ProgressCallback = Arc<dyn Fn(ProgressUpdate) + Send + Sync>;

/// A single answer backend.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Which provider this client serves.
    fn id(&self) -> ProviderId;

    /// Cheap availability probe, run before every dispatch so an
    /// unavailable backend is never actually called.
    async fn is_available(&self) -> bool;

    /// Send one request and wait for the raw reply.
    async fn send_message(
        &self,
        text: &str,
        progress: Option<ProgressCallback>,
    ) -> Result<ProviderReply, ProviderClientError>;

    /// Clear any backend-side conversation state. Default: nothing to clear.
    async fn reset(&self) {}
}
