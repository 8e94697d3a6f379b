//! Pending-request buffering while a request is in flight.

pub mod queue;

pub use queue::{QueuedRequest, RequestQueue};
