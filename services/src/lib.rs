//! Domain services: the university OAuth client, session tokens and the
//! per-topic ticket sequencer.

pub mod oauth;
pub mod session;
pub mod ticket_service;
