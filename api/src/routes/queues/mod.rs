pub mod post;

use axum::{Router, routing::post};

use crate::state::AppState;
use post::reserve;

/// - `POST /queues/reserve` → `reserve`
pub fn queue_routes() -> Router<AppState> {
    Router::new().route("/reserve", post(reserve))
}
