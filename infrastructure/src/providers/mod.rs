//! Backend provider clients.
//!
//! One client per [`ProviderId`](vox_domain::ProviderId): the local Claude
//! CLI subprocess and the two browser-bridge HTTP services.

pub mod bridge;
pub mod claude_cli;

pub use bridge::BridgeClient;
pub use claude_cli::ClaudeCliClient;
