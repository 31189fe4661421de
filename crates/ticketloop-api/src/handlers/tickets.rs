//! Ticket endpoint handlers.
//!
//! Translates HTTP requests to ticket service calls and domain errors to
//! transport responses: validation failures map to 422 with field detail,
//! missing tickets to 404, and store failures to a generic 500 without
//! internal detail.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use ticketloop_core::{CoreError, TicketId, TicketSubmission};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::AppState;

/// Error response with field attribution and message.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error details.
    pub error: ErrorDetail,
}

/// Detailed error information.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Offending input field, when the failure is tied to one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Human-readable error description.
    pub message: String,
}

/// Lists all tickets with their contacts.
///
/// # Errors
///
/// Returns 500 if the store read fails.
#[instrument(name = "list_tickets", skip(state))]
pub async fn list_tickets(State(state): State<AppState>) -> Response {
    match state.service.list_tickets().await {
        Ok(tickets) => (StatusCode::OK, Json(tickets)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Creates a ticket from a submission.
///
/// # Errors
///
/// Returns appropriate HTTP status codes:
/// - 422: invalid email or unknown request field
/// - 500: database or internal errors
#[instrument(
    name = "create_ticket",
    skip(state, submission),
    fields(email_len = submission.email.len())
)]
pub async fn create_ticket(
    State(state): State<AppState>,
    Json(submission): Json<TicketSubmission>,
) -> Response {
    match state.service.create_ticket(submission).await {
        Ok(ticket) => {
            info!(ticket_id = %ticket.id, "Ticket created via API");
            (StatusCode::CREATED, Json(ticket)).into_response()
        },
        Err(e) => error_response(&e),
    }
}

/// Resolves a ticket by ID.
///
/// Idempotent: resolving an already-resolved ticket returns the same
/// terminal state.
///
/// # Errors
///
/// Returns appropriate HTTP status codes:
/// - 404: ticket not found
/// - 500: database or internal errors
#[instrument(name = "resolve_ticket", skip(state), fields(ticket_id = %ticket_id))]
pub async fn resolve_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<Uuid>,
) -> Response {
    match state.service.resolve_ticket(TicketId::from(ticket_id)).await {
        Ok(ticket) => (StatusCode::OK, Json(ticket)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Translates a domain error into a transport response.
fn error_response(err: &CoreError) -> Response {
    match err {
        CoreError::Validation { field, message } => {
            warn!(field = *field, message = %message, "Rejected invalid submission");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: ErrorDetail {
                        field: Some((*field).to_string()),
                        message: message.clone(),
                    },
                }),
            )
                .into_response()
        },
        CoreError::NotFound(message) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: ErrorDetail { field: None, message: message.clone() },
            }),
        )
            .into_response(),
        CoreError::Database(_) | CoreError::ConstraintViolation(_) => {
            error!(error = %err, "Store operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: ErrorDetail {
                        field: None,
                        message: "internal server error".to_string(),
                    },
                }),
            )
                .into_response()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_maps_to_422_with_field() {
        let err = CoreError::validation("email", "must be a valid address");
        let response = error_response(&err);

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = CoreError::NotFound("ticket missing".to_string());
        let response = error_response(&err);

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn database_error_maps_to_500() {
        let err = CoreError::Database("connection reset".to_string());
        let response = error_response(&err);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
