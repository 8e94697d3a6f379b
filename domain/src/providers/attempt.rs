//! Classification of a single provider attempt.
//!
//! Some backends report exhaustion or expired authentication *inside* an
//! outwardly successful response instead of a distinct error channel, so a
//! nominal success must still be scanned for the known failure markers
//! before it is trusted.

use super::id::ProviderId;

/// Substrings that mark a nominally-successful response as a failure.
///
/// Matched case-insensitively against the full response content.
pub const SOFT_FAILURE_MARKERS: &[&str] = &[
    "usage limit",
    "rate limit",
    "quota exceeded",
    "too many requests",
    "session expired",
    "session has expired",
    "please log in",
    "authentication expired",
];

/// Terminal outcome of one provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The backend produced usable content.
    Success(String),
    /// The availability probe failed; the backend was never called.
    Unavailable,
    /// The backend answered with empty or whitespace-only content.
    EmptyResponse,
    /// Nominal success whose content matched a soft-failure marker.
    SoftFailure(&'static str),
    /// Transport or process-level error.
    HardFailure(String),
}

impl AttemptOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AttemptOutcome::Success(_))
    }

    /// Short human-readable description, used in logs and in the
    /// consolidated exhaustion message.
    pub fn describe(&self) -> String {
        match self {
            AttemptOutcome::Success(_) => "success".to_string(),
            AttemptOutcome::Unavailable => "unavailable".to_string(),
            AttemptOutcome::EmptyResponse => "empty response".to_string(),
            AttemptOutcome::SoftFailure(marker) => format!("soft failure ({marker})"),
            AttemptOutcome::HardFailure(message) => message.clone(),
        }
    }
}

/// One provider call and how it ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderAttempt {
    pub provider: ProviderId,
    pub outcome: AttemptOutcome,
}

impl ProviderAttempt {
    pub fn new(provider: ProviderId, outcome: AttemptOutcome) -> Self {
        Self { provider, outcome }
    }
}

/// Classify the raw content of a nominally-successful backend reply.
///
/// Empty or whitespace-only content becomes [`AttemptOutcome::EmptyResponse`];
/// content carrying a soft-failure marker becomes
/// [`AttemptOutcome::SoftFailure`]; anything else is a success with the
/// content trimmed.
pub fn classify_content(content: &str) -> AttemptOutcome {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return AttemptOutcome::EmptyResponse;
    }

    let lowered = trimmed.to_lowercase();
    for marker in SOFT_FAILURE_MARKERS.iter().copied() {
        if lowered.contains(marker) {
            return AttemptOutcome::SoftFailure(marker);
        }
    }

    AttemptOutcome::Success(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_content_is_success() {
        let outcome = classify_content("The capital of France is Paris.");
        assert_eq!(
            outcome,
            AttemptOutcome::Success("The capital of France is Paris.".to_string())
        );
    }

    #[test]
    fn test_success_content_is_trimmed() {
        let outcome = classify_content("  answer \n");
        assert_eq!(outcome, AttemptOutcome::Success("answer".to_string()));
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(classify_content(""), AttemptOutcome::EmptyResponse);
        assert_eq!(classify_content("   \n\t "), AttemptOutcome::EmptyResponse);
    }

    #[test]
    fn test_soft_failure_marker_detected() {
        let outcome = classify_content("You've hit your usage limit. Try again at 5pm.");
        assert_eq!(outcome, AttemptOutcome::SoftFailure("usage limit"));
    }

    #[test]
    fn test_marker_match_is_case_insensitive() {
        let outcome = classify_content("ERROR: Rate Limit reached for this account");
        assert_eq!(outcome, AttemptOutcome::SoftFailure("rate limit"));
    }

    #[test]
    fn test_marker_in_the_middle_of_real_text() {
        // A marker embedded anywhere in the content still poisons the reply.
        let outcome =
            classify_content("Here is a partial answer...\nYour session has expired, log in.");
        assert_eq!(outcome, AttemptOutcome::SoftFailure("session has expired"));
    }

    #[test]
    fn test_describe() {
        assert_eq!(AttemptOutcome::Unavailable.describe(), "unavailable");
        assert_eq!(
            AttemptOutcome::SoftFailure("rate limit").describe(),
            "soft failure (rate limit)"
        );
        assert_eq!(
            AttemptOutcome::HardFailure("connection refused".to_string()).describe(),
            "connection refused"
        );
    }
}
