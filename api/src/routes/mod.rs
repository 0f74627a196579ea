//! HTTP routes under `/api`.
//!
//! - `/health` → liveness check
//! - `/auth` → staff login and session introspection
//! - `/queues` → anonymous ticket reservation
//! - `/config` → shared runtime switches

use axum::Router;

use crate::routes::{
    auth::auth_routes, config::config_routes, health::health_routes, queues::queue_routes,
};
use crate::state::AppState;

pub mod auth;
pub mod config;
pub mod health;
pub mod queues;

/// Builds the `/api` router. The caller nests it and provides the state.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/queues", queue_routes())
        .nest("/config", config_routes())
}
