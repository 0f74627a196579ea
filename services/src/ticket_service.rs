//! Per-topic sequential ticket numbers.
//!
//! A ticket number is the topic code followed by a sequence zero-padded to
//! three digits (`A001`, `A002`, ...). Sequences past 999 keep growing in
//! width (`A1000`). The next number is derived from the most recently created
//! ticket of the topic, so reading the last ticket and inserting the new one
//! run in one transaction that first locks the topic row. Reservations for a
//! topic are serialized by that lock. A duplicate number caught by the
//! `(topic_id, no)` unique index, or a SQLite busy/locked error, aborts the
//! attempt and it is retried.

use db::models::{queue, topic};
use sea_orm::sqlx;
use sea_orm::{DatabaseConnection, DbErr, RuntimeErr, SqlErr, TransactionTrait};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Attempts made before a reservation gives up with [`TicketError::Conflict`].
pub const MAX_ATTEMPTS: u32 = 5;

const RETRY_BACKOFF: Duration = Duration::from_millis(20);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("ticket number '{number}' does not match topic code '{code}'")]
pub struct TicketNumberError {
    pub code: String,
    pub number: String,
}

#[derive(Debug, Error)]
pub enum TicketError {
    #[error("topic {0} not found")]
    TopicNotFound(i64),
    #[error(transparent)]
    TicketNumber(#[from] TicketNumberError),
    #[error("ticket number for topic {topic_id} still taken after {attempts} attempts")]
    Conflict { topic_id: i64, attempts: u32 },
    #[error(transparent)]
    Database(#[from] DbErr),
}

/// A visitor's registration request.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub topic_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub note: Option<String>,
}

/// Reads the sequence out of `number`, which must be `code` followed by digits only.
pub fn parse_sequence(code: &str, number: &str) -> Result<u64, TicketNumberError> {
    let err = || TicketNumberError {
        code: code.to_string(),
        number: number.to_string(),
    };

    let digits = number.strip_prefix(code).ok_or_else(err)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }
    digits.parse().map_err(|_| err())
}

/// The ticket number that follows `last` for a topic with `code`.
pub fn next_ticket_number(code: &str, last: Option<&str>) -> Result<String, TicketNumberError> {
    let next = match last {
        Some(number) => parse_sequence(code, number)? + 1,
        None => 1,
    };
    Ok(format!("{code}{next:03}"))
}

/// Allocates the next number for the topic and inserts the ticket.
pub async fn reserve(db: &DatabaseConnection, ticket: &NewTicket) -> Result<queue::Model, TicketError> {
    for attempt in 1..=MAX_ATTEMPTS {
        match try_reserve(db, ticket).await {
            Err(TicketError::Database(e)) if is_retryable(&e) => {
                warn!(
                    topic_id = ticket.topic_id,
                    attempt,
                    error = %e,
                    "Ticket reservation collided with a concurrent writer, retrying"
                );
                if attempt < MAX_ATTEMPTS {
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                }
            }
            result => return result,
        }
    }

    Err(TicketError::Conflict {
        topic_id: ticket.topic_id,
        attempts: MAX_ATTEMPTS,
    })
}

async fn try_reserve(db: &DatabaseConnection, ticket: &NewTicket) -> Result<queue::Model, TicketError> {
    let txn = db.begin().await?;

    if !topic::Model::lock(&txn, ticket.topic_id).await? {
        return Err(TicketError::TopicNotFound(ticket.topic_id));
    }
    let code = topic::Model::find_code(&txn, ticket.topic_id)
        .await?
        .ok_or(TicketError::TopicNotFound(ticket.topic_id))?;

    let last = queue::Model::latest_for_topic(&txn, ticket.topic_id).await?;
    let no = next_ticket_number(&code, last.as_ref().map(|q| q.no.as_str()))?;

    let created = queue::Model::create(
        &txn,
        &no,
        &ticket.first_name,
        &ticket.last_name,
        ticket.topic_id,
        ticket.note.as_deref(),
    )
    .await?;

    txn.commit().await?;

    info!(topic_id = ticket.topic_id, no = %created.no, "Reserved ticket");
    Ok(created)
}

/// Errors a fresh attempt can succeed after: a number taken by another
/// writer, or SQLite refusing the write lock.
fn is_retryable(err: &DbErr) -> bool {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return true;
    }

    match err {
        DbErr::Conn(RuntimeErr::SqlxError(sqlx::Error::Database(e)))
        | DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(e)))
        | DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(e))) => {
            // SQLITE_BUSY, SQLITE_LOCKED, SQLITE_BUSY_RECOVERY, SQLITE_BUSY_SNAPSHOT
            matches!(e.code().as_deref(), Some("5" | "6" | "261" | "517"))
        }
        _ => false,
    }
}
