use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use db::models::config;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::response::ApiResponse;
use crate::state::AppState;

/// Hub event announcing a new `loginNotCmu` value.
pub const SET_LOGIN_NOT_CMU_EVENT: &str = "setLoginNotCmu";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLoginNotCmuRequest {
    pub login_not_cmu: bool,
}

/// PUT /config/login-not-cmu
///
/// Updates the shared `loginNotCmu` switch and broadcasts the new value to
/// every WebSocket client as `{"event": "setLoginNotCmu", "data": <bool>}`.
///
/// ### Request Body
/// ```json
/// { "loginNotCmu": false }
/// ```
///
/// ### Responses
/// - `200 OK`: `"Config updated successfully"` with the stored row as `data`
/// - `400 Bad Request`: `"Invalid request body"`
/// - `500 Internal Server Error`: `"Failed to update config"`
pub async fn set_login_not_cmu(
    State(state): State<AppState>,
    payload: Result<Json<SetLoginNotCmuRequest>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse<Option<config::Model>>>) {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(e) => {
            warn!("Malformed config update: {e}");
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("Invalid request body")),
            );
        }
    };

    let updated = match config::Model::set_login_not_cmu(state.db(), req.login_not_cmu).await {
        Ok(updated) => updated,
        Err(e) => {
            error!("Failed to update config: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to update config")),
            );
        }
    };

    let delivered = state
        .hub()
        .publish(SET_LOGIN_NOT_CMU_EVENT, &updated.login_not_cmu);
    info!(
        login_not_cmu = updated.login_not_cmu,
        delivered, "Config updated"
    );

    (
        StatusCode::OK,
        Json(ApiResponse::success(Some(updated), "Config updated successfully")),
    )
}
