//! Interactive REPL.

pub mod repl;

pub use repl::AssistantRepl;
