//! FIFO buffer of request texts awaiting dispatch.
//!
//! While one request is being processed, any further `submit` calls land
//! here. Requests leave the queue strictly in arrival order.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// A request waiting its turn (Value Object)
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedRequest {
    pub text: String,
    pub enqueued_at: DateTime<Utc>,
}

impl QueuedRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            enqueued_at: Utc::now(),
        }
    }
}

/// FIFO queue of pending requests.
#[derive(Debug, Default)]
pub struct RequestQueue {
    items: VecDeque<QueuedRequest>,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Append a request and return its 1-based queue position.
    pub fn enqueue(&mut self, text: impl Into<String>) -> usize {
        self.items.push_back(QueuedRequest::new(text));
        self.items.len()
    }

    /// Pop the oldest request, if any.
    pub fn dequeue(&mut self) -> Option<QueuedRequest> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
