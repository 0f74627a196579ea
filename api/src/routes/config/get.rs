use axum::{Json, extract::State, http::StatusCode};
use db::models::config;
use tracing::error;

use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /config
///
/// ### Responses
/// - `200 OK`
/// ```json
/// { "success": true, "data": { "id": 1, "loginNotCmu": true }, "message": "Config retrieved successfully" }
/// ```
/// - `404 Not Found`: `"Config not found"`
/// - `500 Internal Server Error`: `"Failed to retrieve config"`
pub async fn get_config(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<Option<config::Model>>>) {
    match config::Model::get(state.db()).await {
        Ok(Some(cfg)) => (
            StatusCode::OK,
            Json(ApiResponse::success(Some(cfg), "Config retrieved successfully")),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Config not found")),
        ),
        Err(e) => {
            error!("Failed to load config: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to retrieve config")),
            )
        }
    }
}
