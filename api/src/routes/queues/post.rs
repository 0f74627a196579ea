use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use db::models::queue;
use serde::{Deserialize, Serialize};
use services::session::{SessionClaims, SessionScope, SessionSubject};
use services::ticket_service::{self, NewTicket, TicketError};
use tracing::{error, warn};
use validator::Validate;

use crate::response::{ApiResponse, format_validation_errors};
use crate::state::AppState;

/// Hub event carrying a newly reserved ticket.
pub const NEW_QUEUE_EVENT: &str = "newQueue";

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReserveRequest {
    #[serde(default)]
    #[validate(range(min = 1, message = "Topic is required"))]
    pub topic: i64,

    #[serde(default)]
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct ReserveResponse {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue: Option<queue::Model>,
}

type ReserveResult = (StatusCode, Json<ApiResponse<ReserveResponse>>);

fn fail(status: StatusCode, message: &str) -> ReserveResult {
    (status, Json(ApiResponse::error(message)))
}

/// POST /queues/reserve
///
/// Reserves the next ticket of a topic for a visitor who did not sign in.
///
/// ### Request Body
/// ```json
/// { "topic": 1, "firstName": "Anan", "lastName": "Dee", "note": "transcript" }
/// ```
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "token": "jwt_token_here",
///     "queue": { "id": 12, "no": "A008", "firstName": "Anan", "lastName": "Dee", "topicId": 1, "status": "WAITING", ... }
///   },
///   "message": "Queue reserved successfully"
/// }
/// ```
///
/// - `400 Bad Request`: `"Invalid firstname or lastname or topic"`
/// - `409 Conflict`: the ticket number stayed taken by concurrent reservations
/// - `500 Internal Server Error`: unknown topic, unreadable last ticket, database or signing failure
pub async fn reserve(
    State(state): State<AppState>,
    payload: Result<Json<ReserveRequest>, JsonRejection>,
) -> ReserveResult {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(e) => {
            warn!("Malformed reservation request: {e}");
            return fail(StatusCode::BAD_REQUEST, "Invalid firstname or lastname or topic");
        }
    };

    if let Err(errors) = req.validate() {
        warn!("Invalid reservation request: {}", format_validation_errors(&errors));
        return fail(StatusCode::BAD_REQUEST, "Invalid firstname or lastname or topic");
    }

    let claims = SessionClaims::build(
        SessionSubject::Manual {
            first_name: &req.first_name,
            last_name: &req.last_name,
        },
        SessionScope::Visitor,
    );
    let token = match state.signer().issue(&claims) {
        Ok(token) => token,
        Err(e) => {
            error!("Failed to sign session token: {e}");
            return fail(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate JWT token");
        }
    };

    let ticket = NewTicket {
        topic_id: req.topic,
        first_name: req.first_name,
        last_name: req.last_name,
        note: req.note,
    };

    let created = match ticket_service::reserve(state.db(), &ticket).await {
        Ok(created) => created,
        Err(e) => {
            let (status, message) = match &e {
                TicketError::TopicNotFound(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Failed to retrieve topic code")
                }
                TicketError::TicketNumber(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to parse the last queue number",
                ),
                TicketError::Conflict { .. } => {
                    (StatusCode::CONFLICT, "Queue number conflict, please retry")
                }
                TicketError::Database(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create queue")
                }
            };
            error!("Reservation for topic {} failed: {e}", ticket.topic_id);
            return fail(status, message);
        }
    };

    state.hub().publish(NEW_QUEUE_EVENT, &created);

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            ReserveResponse {
                token,
                queue: Some(created),
            },
            "Queue reserved successfully",
        )),
    )
}
