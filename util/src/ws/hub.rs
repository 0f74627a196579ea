//! A single process-wide broadcast channel for pushing events to WebSocket clients.
//!
//! Every connected client subscribes to the same channel. Publishing is
//! fire-and-forget: there is no backpressure, and a subscriber that falls more
//! than `capacity` messages behind skips the messages it missed.

use serde::Serialize;
use tokio::sync::broadcast;

use super::EventEnvelope;

/// Default channel capacity.
pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Clone)]
pub struct Hub {
    tx: broadcast::Sender<String>,
}

impl Default for Hub {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Hub {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribes to all future messages.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Serializes `{event, data}` and sends it to all current subscribers.
    ///
    /// Returns the number of subscribers that received the message. Having no
    /// subscribers is not an error.
    pub fn publish<T: Serialize>(&self, event: &str, data: &T) -> usize {
        let envelope = EventEnvelope { event, data };
        match serde_json::to_string(&envelope) {
            Ok(json) => self.send_raw(json),
            Err(e) => {
                tracing::error!("Failed to serialize '{event}' event: {e}");
                0
            }
        }
    }

    /// Sends an already serialized message.
    pub fn send_raw<T: Into<String>>(&self, msg: T) -> usize {
        match self.tx.send(msg.into()) {
            Ok(n) => n,
            Err(_) => {
                tracing::debug!("Broadcast dropped: no subscribers");
                0
            }
        }
    }
}
