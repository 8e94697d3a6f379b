//! Provider gateway: a uniform probe → call → classify wrapper around the
//! registered backend clients.
//!
//! The gateway never lets a backend error escape as an error: every call
//! ends in a [`ProviderAttempt`] whose outcome the chain walk can act on.

use crate::ports::provider_client::{ProgressCallback, ProviderClient};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use vox_domain::{AttemptOutcome, ProviderAttempt, ProviderId, classify_content};

/// Registry of backend clients keyed by provider.
pub struct ProviderGateway {
    clients: HashMap<ProviderId, Arc<dyn ProviderClient>>,
}

impl ProviderGateway {
    /// Build a gateway from the given clients. If two clients claim the
    /// same provider, the last registration wins.
    pub fn new(clients: Vec<Arc<dyn ProviderClient>>) -> Self {
        let mut map: HashMap<ProviderId, Arc<dyn ProviderClient>> = HashMap::new();
        for client in clients {
            let id = client.id();
            if map.insert(id, client).is_some() {
                warn!(provider = %id, "duplicate client registration, keeping the later one");
            }
        }
        Self { clients: map }
    }

    /// Providers with a registered client.
    pub fn registered(&self) -> Vec<ProviderId> {
        self.clients.keys().copied().collect()
    }

    /// Availability probe only, without calling the backend.
    pub async fn probe(&self, provider: ProviderId) -> bool {
        match self.clients.get(&provider) {
            Some(client) => client.is_available().await,
            None => false,
        }
    }

    /// Call one provider and classify the result.
    ///
    /// The availability probe runs first; an unavailable backend is never
    /// actually invoked. A nominally-successful reply is still scanned for
    /// soft-failure markers before it counts as a success.
    pub async fn call(
        &self,
        provider: ProviderId,
        text: &str,
        progress: Option<ProgressCallback>,
    ) -> ProviderAttempt {
        let Some(client) = self.clients.get(&provider) else {
            debug!(provider = %provider, "no client registered");
            return ProviderAttempt::new(provider, AttemptOutcome::Unavailable);
        };

        if !client.is_available().await {
            debug!(provider = %provider, "availability probe failed, skipping call");
            return ProviderAttempt::new(provider, AttemptOutcome::Unavailable);
        }

        match client.send_message(text, progress).await {
            Ok(reply) => ProviderAttempt::new(provider, classify_content(&reply.content)),
            Err(err) => {
                ProviderAttempt::new(provider, AttemptOutcome::HardFailure(err.to_string()))
            }
        }
    }

    /// Clear backend-side conversation state on every client.
    pub async fn reset_all(&self) {
        for client in self.clients.values() {
            client.reset().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::provider_client::{ProviderClientError, ProviderReply};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    struct StubClient {
        id: ProviderId,
        available: bool,
        reply: Result<String, String>,
        send_calls: AtomicUsize,
        reset_called: AtomicBool,
    }

    impl StubClient {
        fn new(id: ProviderId, available: bool, reply: Result<&str, &str>) -> Arc<Self> {
            Arc::new(Self {
                id,
                available,
                reply: reply.map(str::to_string).map_err(str::to_string),
                send_calls: AtomicUsize::new(0),
                reset_called: AtomicBool::new(false),
            })
        }
    }

    #[async_trait]
    impl ProviderClient for StubClient {
        fn id(&self) -> ProviderId {
            self.id
        }

        async fn is_available(&self) -> bool {
            self.available
        }

        async fn send_message(
            &self,
            _text: &str,
            _progress: Option<ProgressCallback>,
        ) -> Result<ProviderReply, ProviderClientError> {
            self.send_calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(content) => Ok(ProviderReply {
                    content: content.clone(),
                    elapsed: Duration::from_millis(1),
                }),
                Err(message) => Err(ProviderClientError::Connection(message.clone())),
            }
        }

        async fn reset(&self) {
            self.reset_called.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_success_is_classified() {
        let client = StubClient::new(ProviderId::Claude, true, Ok("The answer."));
        let gateway = ProviderGateway::new(vec![client as Arc<dyn ProviderClient>]);

        let attempt = gateway.call(ProviderId::Claude, "question", None).await;
        assert_eq!(attempt.provider, ProviderId::Claude);
        assert_eq!(
            attempt.outcome,
            AttemptOutcome::Success("The answer.".to_string())
        );
    }

    #[tokio::test]
    async fn test_unavailable_client_is_never_called() {
        let client = StubClient::new(ProviderId::ChatGpt, false, Ok("unused"));
        let gateway = ProviderGateway::new(vec![client.clone() as Arc<dyn ProviderClient>]);

        let attempt = gateway.call(ProviderId::ChatGpt, "question", None).await;
        assert_eq!(attempt.outcome, AttemptOutcome::Unavailable);
        assert_eq!(client.send_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unregistered_provider_is_unavailable() {
        let gateway = ProviderGateway::new(vec![]);
        let attempt = gateway.call(ProviderId::Gemini, "question", None).await;
        assert_eq!(attempt.outcome, AttemptOutcome::Unavailable);
    }

    #[tokio::test]
    async fn test_soft_failure_in_nominal_success() {
        let client = StubClient::new(
            ProviderId::Gemini,
            true,
            Ok("You've reached your usage limit for today."),
        );
        let gateway = ProviderGateway::new(vec![client as Arc<dyn ProviderClient>]);

        let attempt = gateway.call(ProviderId::Gemini, "question", None).await;
        assert_eq!(attempt.outcome, AttemptOutcome::SoftFailure("usage limit"));
    }

    #[tokio::test]
    async fn test_empty_reply() {
        let client = StubClient::new(ProviderId::Claude, true, Ok("   "));
        let gateway = ProviderGateway::new(vec![client as Arc<dyn ProviderClient>]);

        let attempt = gateway.call(ProviderId::Claude, "question", None).await;
        assert_eq!(attempt.outcome, AttemptOutcome::EmptyResponse);
    }

    #[tokio::test]
    async fn test_transport_error_is_hard_failure() {
        let client = StubClient::new(ProviderId::ChatGpt, true, Err("connection refused"));
        let gateway = ProviderGateway::new(vec![client as Arc<dyn ProviderClient>]);

        let attempt = gateway.call(ProviderId::ChatGpt, "question", None).await;
        match attempt.outcome {
            AttemptOutcome::HardFailure(message) => {
                assert!(message.contains("connection refused"));
            }
            other => panic!("expected HardFailure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_probe() {
        let up = StubClient::new(ProviderId::Claude, true, Ok("x"));
        let down = StubClient::new(ProviderId::Gemini, false, Ok("x"));
        let gateway = ProviderGateway::new(vec![
            up as Arc<dyn ProviderClient>,
            down as Arc<dyn ProviderClient>,
        ]);

        assert!(gateway.probe(ProviderId::Claude).await);
        assert!(!gateway.probe(ProviderId::Gemini).await);
        assert!(!gateway.probe(ProviderId::ChatGpt).await);
    }

    #[tokio::test]
    async fn test_reset_all_reaches_every_client() {
        let a = StubClient::new(ProviderId::Claude, true, Ok("x"));
        let b = StubClient::new(ProviderId::Gemini, true, Ok("x"));
        let gateway = ProviderGateway::new(vec![
            a.clone() as Arc<dyn ProviderClient>,
            b.clone() as Arc<dyn ProviderClient>,
        ]);

        gateway.reset_all().await;
        assert!(a.reset_called.load(Ordering::SeqCst));
        assert!(b.reset_called.load(Ordering::SeqCst));
    }
}
