//! HTTP client for the browser-bridge backends.
//!
//! The ChatGPT and Gemini backends are reached through small local bridge
//! services that drive a logged-in browser session. Both speak the same
//! protocol: `GET /health` for availability, `POST /chat` with a JSON
//! `{"message": …}` body, and `POST /reset` to drop the bridge-side
//! conversation. Replies use camelCase fields: `{isError, content,
//! errorMessage}`.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use vox_application::ports::provider_client::{
    ProgressCallback, ProgressUpdate, ProviderClient, ProviderClientError, ProviderReply,
};
use vox_domain::ProviderId;

/// Browser automation is slow; give a chat round-trip generous room.
const CHAT_TIMEOUT: Duration = Duration::from_secs(300);

/// The health endpoint answers quickly when the bridge is up.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

/// Reset is fire-and-forget with a short leash.
const RESET_TIMEOUT: Duration = Duration::from_secs(30);

/// Interval between progress ticks during a chat call.
const PROGRESS_INTERVAL: Duration = Duration::from_secs(5);

/// Status line reported while waiting on the bridge.
const PROGRESS_STATUS: &str = "waiting for the bridge reply";

/// Reply body of the `/chat` endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BridgeReply {
    #[serde(default)]
    is_error: bool,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

/// Client for one bridge service.
pub struct BridgeClient {
    id: ProviderId,
    base_url: String,
    http: reqwest::Client,
}

impl BridgeClient {
    pub fn new(id: ProviderId, base_url: impl Into<String>) -> Self {
        Self {
            id,
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Bridge for the ChatGPT browser session.
    pub fn chatgpt(base_url: impl Into<String>) -> Self {
        Self::new(ProviderId::ChatGpt, base_url)
    }

    /// Bridge for the Gemini browser session.
    pub fn gemini(base_url: impl Into<String>) -> Self {
        Self::new(ProviderId::Gemini, base_url)
    }
}

#[async_trait]
impl ProviderClient for BridgeClient {
    fn id(&self) -> ProviderId {
        self.id
    }

    async fn is_available(&self) -> bool {
        let url = endpoint(&self.base_url, "health");
        let request = self.http.get(&url).send();
        match tokio::time::timeout(HEALTH_TIMEOUT, request).await {
            Ok(Ok(response)) => response.status().is_success(),
            Ok(Err(err)) => {
                debug!(provider = %self.id, error = %err, "health check failed");
                false
            }
            Err(_) => {
                debug!(provider = %self.id, "health check timed out");
                false
            }
        }
    }

    async fn send_message(
        &self,
        text: &str,
        progress: Option<ProgressCallback>,
    ) -> Result<ProviderReply, ProviderClientError> {
        let url = endpoint(&self.base_url, "chat");
        let started = Instant::now();

        info!(provider = %self.id, "dispatching to the bridge");

        let request = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "message": text }))
            .send();
        tokio::pin!(request);

        let deadline = tokio::time::sleep(CHAT_TIMEOUT);
        tokio::pin!(deadline);

        let mut ticker = tokio::time::interval_at(
            tokio::time::Instant::now() + PROGRESS_INTERVAL,
            PROGRESS_INTERVAL,
        );

        let response = loop {
            tokio::select! {
                result = &mut request => {
                    break result.map_err(|err| {
                        ProviderClientError::Connection(format!("bridge request failed: {err}"))
                    })?;
                }
                _ = ticker.tick() => {
                    if let Some(progress) = &progress {
                        progress(ProgressUpdate {
                            elapsed: started.elapsed(),
                            status: PROGRESS_STATUS.to_string(),
                        });
                    }
                }
                _ = &mut deadline => {
                    warn!(provider = %self.id, "bridge call timed out");
                    return Err(ProviderClientError::Timeout(CHAT_TIMEOUT.as_secs()));
                }
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            return Err(ProviderClientError::Backend(format!(
                "bridge returned HTTP {status}"
            )));
        }

        let reply: BridgeReply = response.json().await.map_err(|err| {
            ProviderClientError::Backend(format!("malformed bridge reply: {err}"))
        })?;

        if reply.is_error {
            return Err(ProviderClientError::Backend(
                reply
                    .error_message
                    .unwrap_or_else(|| "bridge reported an error".to_string()),
            ));
        }

        let elapsed = started.elapsed();
        let content = reply.content.unwrap_or_default();
        info!(
            provider = %self.id,
            chars = content.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "bridge replied"
        );

        Ok(ProviderReply { content, elapsed })
    }

    async fn reset(&self) {
        let url = endpoint(&self.base_url, "reset");
        let request = self.http.post(&url).send();
        match tokio::time::timeout(RESET_TIMEOUT, request).await {
            Ok(Ok(_)) => debug!(provider = %self.id, "bridge session reset"),
            Ok(Err(err)) => warn!(provider = %self.id, error = %err, "bridge reset failed"),
            Err(_) => warn!(provider = %self.id, "bridge reset timed out"),
        }
    }
}
