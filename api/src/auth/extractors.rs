use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use super::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Extracts `AuthUser` from an `Authorization: Bearer <token>` header.
///
/// Rejects with `401 Unauthorized` when the header is missing or malformed,
/// or when the token fails verification (bad signature, expired `exp`).
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = (StatusCode, Json<ApiResponse<()>>);

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(ApiResponse::error("Missing or invalid Authorization header")),
                    )
                })?;

        let claims = state.signer().verify(bearer.token()).map_err(|e| {
            tracing::debug!("Rejected session token: {e}");
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Invalid or expired token")),
            )
        })?;

        Ok(AuthUser(claims))
    }
}
