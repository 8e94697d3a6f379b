//! Brand redaction for user-visible failure text.
//!
//! Error messages bubbling up from a backend routinely name the backend or
//! its vendor. Before display, those names are replaced with the product's
//! own name so failures never reveal which external system was in use.

/// The assistant's product name, substituted for backend brand names.
pub const PRODUCT_NAME: &str = "VoxPilot";

/// Fixed substring-replacement table, applied in order.
const BRAND_REPLACEMENTS: &[&str] = &[
    "ChatGPT",
    "chatgpt",
    "Claude",
    "claude",
    "Anthropic",
    "anthropic",
    "OpenAI",
    "openai",
    "Gemini",
    "gemini",
];

/// Replace every occurrence of a known backend brand name with
/// [`PRODUCT_NAME`].
pub fn scrub_brands(message: &str) -> String {
    let mut scrubbed = message.to_string();
    for brand in BRAND_REPLACEMENTS {
        if scrubbed.contains(brand) {
            scrubbed = scrubbed.replace(brand, PRODUCT_NAME);
        }
    }
    scrubbed
}
