pub mod get;
pub mod put;

use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;
use get::get_config;
use put::set_login_not_cmu;

/// - `GET /config` → `get_config`
/// - `PUT /config/login-not-cmu` → `set_login_not_cmu`
pub fn config_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_config))
        .route("/login-not-cmu", put(set_login_not_cmu))
}
