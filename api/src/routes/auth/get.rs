use axum::{Json, http::StatusCode, response::IntoResponse};
use services::session::SessionClaims;

use crate::auth::AuthUser;
use crate::response::ApiResponse;

/// GET /auth/me
///
/// Returns the claims of the caller's session token.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": { "email": "somchai_j@cmu.ac.th", "firstName": "สมชาย", "lastName": "ใจดี", "faculty": "..." },
///   "message": "Session retrieved successfully"
/// }
/// ```
/// - `401 Unauthorized` when the token is missing or invalid.
pub async fn get_me(AuthUser(claims): AuthUser) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::<SessionClaims>::success(
            claims,
            "Session retrieved successfully",
        )),
    )
}
