//! Static fallback-chain policy.
//!
//! When the preferred backend fails, the remaining backends are tried in a
//! fixed secondary order. The table is static so a given preference always
//! produces the same chain — nothing is computed or randomized at runtime.

use super::id::ProviderId;

/// Resolve the full attempt order for a preferred provider.
///
/// The preferred provider comes first; the bridge backends fall back to the
/// local CLI before each other, since the CLI does not depend on a logged-in
/// browser session. Every known provider appears exactly once.
pub fn fallback_chain(preferred: ProviderId) -> Vec<ProviderId> {
    match preferred {
        ProviderId::Claude => vec![ProviderId::Claude, ProviderId::ChatGpt, ProviderId::Gemini],
        ProviderId::ChatGpt => vec![ProviderId::ChatGpt, ProviderId::Claude, ProviderId::Gemini],
        ProviderId::Gemini => vec![ProviderId::Gemini, ProviderId::Claude, ProviderId::ChatGpt],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferred_is_first() {
        for preferred in ProviderId::all() {
            assert_eq!(fallback_chain(preferred)[0], preferred);
        }
    }

    #[test]
    fn test_chain_is_permutation_of_all_providers() {
        for preferred in ProviderId::all() {
            let chain = fallback_chain(preferred);
            assert_eq!(chain.len(), ProviderId::all().len());
            for provider in ProviderId::all() {
                assert_eq!(
                    chain.iter().filter(|p| **p == provider).count(),
                    1,
                    "{provider} must appear exactly once in the chain for {preferred}"
                );
            }
        }
    }

    #[test]
    fn test_chain_is_deterministic() {
        for preferred in ProviderId::all() {
            assert_eq!(fallback_chain(preferred), fallback_chain(preferred));
        }
    }

    #[test]
    fn test_bridges_fall_back_to_cli_first() {
        assert_eq!(fallback_chain(ProviderId::ChatGpt)[1], ProviderId::Claude);
        assert_eq!(fallback_chain(ProviderId::Gemini)[1], ProviderId::Claude);
    }
}
