// util/src/ws/mod.rs
pub mod hub;
pub use hub::Hub;

use serde::Serialize;

/// Envelope sent to every WebSocket subscriber.
#[derive(Debug, Serialize)]
pub struct EventEnvelope<'a, T> {
    pub event: &'a str,
    pub data: T,
}
