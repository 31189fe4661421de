//! Health check handlers for service monitoring.
//!
//! The liveness probe returns a fixed acknowledgement with no dependency on
//! the data store; the readiness probe verifies database connectivity.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error, instrument};

use crate::AppState;

/// Liveness check endpoint.
///
/// Returns a fixed acknowledgement indicating the service process is
/// alive. Does not touch external dependencies, so it is safe to call
/// frequently from load balancers.
#[instrument(name = "health_check")]
pub async fn health_check() -> &'static str {
    "ok"
}

/// Readiness check endpoint.
///
/// Verifies database connectivity with a lightweight query. Returns 503
/// when the store is unreachable so orchestrators stop routing traffic.
#[instrument(name = "readiness_check", skip(state))]
pub async fn readiness_check(State(state): State<AppState>) -> Response {
    match state.storage.health_check().await {
        Ok(()) => {
            debug!("Readiness check passed");
            (StatusCode::OK, Json(serde_json::json!({ "status": "ready" }))).into_response()
        },
        Err(e) => {
            error!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "status": "unavailable" })),
            )
                .into_response()
        },
    }
}
