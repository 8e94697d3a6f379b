//! Spoken-excerpt derivation.
//!
//! Full answers are rendered on screen; speech synthesis only reads a short
//! opening excerpt. Fenced code blocks are useless when read aloud and are
//! replaced with a placeholder before the excerpt is taken.

use crate::core::string::truncate;

/// Placeholder read in place of a fenced code block.
pub const CODE_BLOCK_PLACEHOLDER: &str = "[code block]";

/// Spoken when the content is blank and there is nothing to excerpt.
pub const EMPTY_CONTENT_NOTICE: &str = "The answer is ready on your screen.";

/// Appended to the spoken excerpt when the full answer is long.
pub const ON_SCREEN_NOTICE: &str = " Details are on your screen.";

/// Number of leading sentences read aloud.
const EXCERPT_SENTENCES: usize = 3;

/// Maximum excerpt length in bytes (ellipsis-truncated beyond this).
const EXCERPT_MAX_LEN: usize = 300;

/// Excerpts shorter than this fall back to reading the content directly.
const EXCERPT_MIN_LEN: usize = 50;

/// Content longer than this gets the on-screen notice appended.
const LONG_CONTENT_THRESHOLD: usize = 1000;

/// Replace balanced ``` fenced blocks with [`CODE_BLOCK_PLACEHOLDER`].
///
/// An unbalanced trailing fence is left as-is.
fn replace_code_blocks(text: &str) -> String {
    let mut out = String::new();
    let mut rest = text;
    while let Some(start) = rest.find("```") {
        let after = &rest[start + 3..];
        match after.find("```") {
            Some(end) => {
                out.push_str(&rest[..start]);
                out.push_str(CODE_BLOCK_PLACEHOLDER);
                rest = &after[end + 3..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Split text into sentences on terminal punctuation followed by whitespace.
///
/// The punctuation stays with its sentence; trailing text without terminal
/// punctuation counts as a final sentence.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().is_some_and(|n| n.is_whitespace()) {
            while chars.peek().is_some_and(|n| n.is_whitespace()) {
                chars.next();
            }
            let sentence = current.trim().to_string();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            current.clear();
        }
    }

    let tail = current.trim().to_string();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

/// Derive the short spoken form of a full answer.
///
/// Takes the first few sentences of the content (code blocks replaced by a
/// placeholder), capped with ellipsis truncation. An excerpt too short to
/// be meaningful falls back to truncating the cleaned content directly.
/// Long answers get a notice that the rest is on screen.
pub fn spoken_excerpt(content: &str) -> String {
    if content.trim().is_empty() {
        return EMPTY_CONTENT_NOTICE.to_string();
    }

    let cleaned = replace_code_blocks(content);

    let mut excerpt = split_sentences(&cleaned)
        .into_iter()
        .take(EXCERPT_SENTENCES)
        .collect::<Vec<_>>()
        .join(" ");

    if excerpt.len() > EXCERPT_MAX_LEN {
        excerpt = truncate(&excerpt, EXCERPT_MAX_LEN);
    }

    // Too short to be worth reading — read the content itself instead.
    if excerpt.len() < EXCERPT_MIN_LEN {
        return truncate(cleaned.trim(), EXCERPT_MAX_LEN);
    }

    if content.len() > LONG_CONTENT_THRESHOLD {
        excerpt.push_str(ON_SCREEN_NOTICE);
    }

    excerpt
}
