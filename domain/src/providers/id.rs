//! Provider identifier value object

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The answer backends known to the assistant (Value Object)
///
/// Each identifier is bound to exactly one client implementation in the
/// infrastructure layer: the local Claude CLI, or one of the two browser
/// bridge services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Claude,
    ChatGpt,
    Gemini,
}

impl ProviderId {
    /// Get the string identifier for this provider
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Claude => "claude",
            ProviderId::ChatGpt => "chatgpt",
            ProviderId::Gemini => "gemini",
        }
    }

    /// All known providers, in declaration order.
    pub fn all() -> [ProviderId; 3] {
        [ProviderId::Claude, ProviderId::ChatGpt, ProviderId::Gemini]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "claude" => Ok(ProviderId::Claude),
            "chatgpt" | "gpt" => Ok(ProviderId::ChatGpt),
            "gemini" => Ok(ProviderId::Gemini),
            other => Err(DomainError::UnknownProvider(other.to_string())),
        }
    }
}

impl Serialize for ProviderId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProviderId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        for provider in ProviderId::all() {
            let s = provider.to_string();
            let parsed: ProviderId = s.parse().unwrap();
            assert_eq!(provider, parsed);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Claude".parse::<ProviderId>().unwrap(), ProviderId::Claude);
        assert_eq!("GPT".parse::<ProviderId>().unwrap(), ProviderId::ChatGpt);
    }

    #[test]
    fn test_unknown_provider_is_error() {
        let result = "grok".parse::<ProviderId>();
        assert!(matches!(result, Err(DomainError::UnknownProvider(_))));
    }

    #[test]
    fn test_all_lists_each_provider_once() {
        let all = ProviderId::all();
        assert_eq!(all.len(), 3);
        for provider in all {
            assert_eq!(all.iter().filter(|p| **p == provider).count(), 1);
        }
    }
}
