use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use db::models::user::{self, ProfileNames};
use serde::{Deserialize, Serialize};
use services::session::{SessionClaims, SessionScope, SessionSubject};
use tracing::{error, info, warn};
use validator::Validate;

use crate::response::{ApiResponse, format_validation_errors};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Authorization code is required"))]
    pub code: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Redirect URI is required"))]
    pub redirect_uri: String,
}

#[derive(Debug, Serialize, Default)]
pub struct LoginResponse {
    pub token: String,
    /// Present only for recognized staff.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<user::Model>,
}

type LoginResult = (StatusCode, Json<ApiResponse<LoginResponse>>);

fn fail(status: StatusCode, message: &str) -> LoginResult {
    (status, Json(ApiResponse::error(message)))
}

/// POST /auth/login
///
/// Signs a caller in with an authorization code issued by CMU OAuth.
///
/// ### Request Body
/// ```json
/// { "code": "abc123", "redirectUri": "https://queue.example/callback" }
/// ```
///
/// ### Responses
///
/// - `200 OK` (staff member, names backfilled from the profile when needed)
/// ```json
/// {
///   "success": true,
///   "data": {
///     "token": "jwt_token_here",
///     "user": { "id": 1, "firstNameTH": "สมชาย", "lastNameTH": "ใจดี", "firstNameEN": "SOMCHAI", "lastNameEN": "JAIDEE", "email": "somchai_j@cmu.ac.th", "counterId": 1 }
///   },
///   "message": "Login successful"
/// }
/// ```
///
/// - `200 OK` (student without a staff account, token only)
/// ```json
/// { "success": true, "data": { "token": "jwt_token_here" }, "message": "Login successful" }
/// ```
///
/// - `400 Bad Request`: missing code or redirect URI, or the provider rejected the exchange
/// - `403 Forbidden`: non-student account without a staff account (`"Cannot access"`)
/// - `500 Internal Server Error`: database or token signing failure
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> LoginResult {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(e) => {
            warn!("Malformed login request: {e}");
            return fail(StatusCode::BAD_REQUEST, "Invalid authorization code or redirect URI");
        }
    };

    if let Err(errors) = req.validate() {
        warn!("Invalid login request: {}", format_validation_errors(&errors));
        return fail(StatusCode::BAD_REQUEST, "Invalid authorization code or redirect URI");
    }

    let access_token = match state.oauth().exchange_code(&req.code, &req.redirect_uri).await {
        Ok(token) => token,
        Err(e) => {
            error!("OAuth token exchange failed: {e}");
            return fail(StatusCode::BAD_REQUEST, "Cannot get OAuth access token");
        }
    };

    let info = match state.oauth().fetch_profile(&access_token).await {
        Ok(info) => info,
        Err(e) => {
            error!("OAuth profile fetch failed: {e}");
            return fail(StatusCode::BAD_REQUEST, "Cannot get CMU basic info");
        }
    };

    let existing = match user::Model::find_by_email(state.db(), &info.account).await {
        Ok(existing) => existing,
        Err(e) => {
            error!("Failed to look up user {}: {e}", info.account);
            return fail(StatusCode::INTERNAL_SERVER_ERROR, "Failed to retrieve user");
        }
    };

    let Some(existing) = existing else {
        if !info.is_student() {
            warn!(
                email = %info.account,
                account_type = %info.account_type_id,
                "Login denied for account without staff access"
            );
            return fail(StatusCode::FORBIDDEN, "Cannot access");
        }

        let claims = SessionClaims::build(SessionSubject::Profile(&info), SessionScope::Visitor);
        return match state.signer().issue(&claims) {
            Ok(token) => {
                info!(email = %info.account, "Student signed in");
                (
                    StatusCode::OK,
                    Json(ApiResponse::success(
                        LoginResponse { token, user: None },
                        "Login successful",
                    )),
                )
            }
            Err(e) => {
                error!("Failed to sign session token: {e}");
                fail(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate JWT token")
            }
        };
    };

    let claims = SessionClaims::build(SessionSubject::Profile(&info), SessionScope::Admin);
    let token = match state.signer().issue(&claims) {
        Ok(token) => token,
        Err(e) => {
            error!("Failed to sign session token: {e}");
            return fail(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate JWT token");
        }
    };

    let staff = if existing.missing_english_name() {
        let names = ProfileNames {
            firstname_th: &info.firstname_th,
            lastname_th: &info.lastname_th,
            firstname_en: &info.firstname_en,
            lastname_en: &info.lastname_en,
        };
        match existing.update_names(state.db(), &names).await {
            Ok(updated) => updated,
            Err(e) => {
                error!("Failed to backfill names for {}: {e}", info.account);
                return fail(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update user data");
            }
        }
    } else {
        existing
    };

    info!(email = %staff.email, user_id = staff.id, "Staff signed in");
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            LoginResponse {
                token,
                user: Some(staff),
            },
            "Login successful",
        )),
    )
}
