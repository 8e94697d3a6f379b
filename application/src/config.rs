//! Orchestrator settings.

use std::time::Duration;
use vox_domain::ProviderId;

/// Delay before the canned identity response is emitted, so the local
/// short-circuit is not perceptibly instantaneous next to a real backend
/// round-trip.
pub const IDENTITY_RESPONSE_DELAY: Duration = Duration::from_millis(3000);

/// Settings fixed at orchestrator construction.
///
/// The preferred provider is explicit here rather than read from shared
/// mutable state, so two sessions can never silently influence each other.
#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    /// First provider in the fallback chain.
    pub preferred_provider: ProviderId,
    /// Artificial delay before the identity short-circuit answers.
    pub identity_delay: Duration,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            preferred_provider: ProviderId::Claude,
            identity_delay: IDENTITY_RESPONSE_DELAY,
        }
    }
}

impl OrchestratorSettings {
    pub fn with_preferred_provider(mut self, provider: ProviderId) -> Self {
        self.preferred_provider = provider;
        self
    }

    pub fn with_identity_delay(mut self, delay: Duration) -> Self {
        self.identity_delay = delay;
        self
    }
}
