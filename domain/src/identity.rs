//! Identity question interceptor.
//!
//! Questions about the assistant's name, origin, creator, or underlying
//! model are answered locally with a fixed statement and never forwarded to
//! an answer backend — the backends would otherwise name themselves or
//! their vendor. Classification is a pure substring containment test over
//! normalized text.

/// Displayed identity statement, appended to the conversation as-is.
pub const IDENTITY_RESPONSE: &str =
    "I'm VoxPilot, your AI voice assistant. The VoxPilot team built me to answer questions hands-free.";

/// Spoken variant of [`IDENTITY_RESPONSE`].
///
/// Identical except the "AI" abbreviation is spelled phonetically — speech
/// synthesis otherwise reads the bare letters as a word.
pub const IDENTITY_RESPONSE_SPOKEN: &str =
    "I'm VoxPilot, your ay-eye voice assistant. The VoxPilot team built me to answer questions hands-free.";

/// Normalized trigger phrases. A normalized question *containing* any of
/// these counts as an identity question; exact match is not required.
const IDENTITY_TRIGGERS: &[&str] = &[
    "who are you",
    "what are you",
    "what is your name",
    "what's your name",
    "who made you",
    "who created you",
    "who built you",
    "who developed you",
    "what model are you",
    "which model are you",
    "what ai are you",
    "which ai are you",
    "are you chatgpt",
    "are you claude",
    "are you gemini",
];

/// Normalize text for trigger matching: trim, lowercase, strip terminal
/// `?` `!` `.` punctuation, trim again.
fn normalize(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .trim_end_matches(['?', '!', '.'])
        .trim()
        .to_string()
}

/// Does this text ask who or what the assistant is?
pub fn is_identity_question(text: &str) -> bool {
    let normalized = normalize(text);
    IDENTITY_TRIGGERS
        .iter()
        .any(|trigger| normalized.contains(trigger))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_terminal_punctuation() {
        assert_eq!(normalize("Who are you?"), "who are you");
        assert_eq!(normalize("Who are you?!."), "who are you");
        assert_eq!(normalize("  WHO ARE YOU  "), "who are you");
    }

    #[test]
    fn test_normalize_keeps_interior_punctuation() {
        assert_eq!(normalize("what's your name?"), "what's your name");
    }

    #[test]
    fn test_direct_identity_questions() {
        assert!(is_identity_question("Who are you?"));
        assert!(is_identity_question("what's your name"));
        assert!(is_identity_question("WHO MADE YOU?!"));
        assert!(is_identity_question("Which model are you?"));
        assert!(is_identity_question("are you ChatGPT?"));
    }

    #[test]
    fn test_containment_matches_embedded_trigger() {
        assert!(is_identity_question(
            "By the way, who are you and who built you?"
        ));
        assert!(is_identity_question("tell me, what model are you running"));
    }

    #[test]
    fn test_ordinary_questions_do_not_match() {
        assert!(!is_identity_question("What is the capital of France?"));
        assert!(!is_identity_question("Who was the first person on the moon?"));
        assert!(!is_identity_question("How do I rename a git branch?"));
        assert!(!is_identity_question(""));
    }

    #[test]
    fn test_spoken_variant_differs_only_in_abbreviation() {
        assert_eq!(
            IDENTITY_RESPONSE.replace("AI", "ay-eye"),
            IDENTITY_RESPONSE_SPOKEN
        );
    }
}
