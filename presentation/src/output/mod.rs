//! Console output for the orchestrator's event stream.

pub mod console;

pub use console::ConsoleRenderer;
