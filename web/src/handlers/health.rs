//! Health check endpoints.
//!
//! These endpoints are used by load balancers and monitoring systems
//! to verify service health.

use crate::state::AppState;
use armory_core::WeaponStore;
use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

/// Simple health check endpoint (for basic liveness).
///
/// Returns 200 OK to indicate the service is running.
/// This endpoint does NOT check the store.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Readiness report.
#[derive(Debug, Serialize)]
pub struct Readiness {
    /// `"ready"` or `"unavailable"`.
    pub status: &'static str,
    /// Number of stored weapons, when the store answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weapons: Option<u64>,
}

/// Readiness check that probes the store with a `count`.
///
/// # Status Codes
///
/// - 200 OK: store reachable
/// - 503 Service Unavailable: store failed
///
/// # Endpoint
///
/// ```text
/// GET /ready
/// ```
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<Readiness>) {
    match state.service.store().count().await {
        Ok(count) => (
            StatusCode::OK,
            Json(Readiness {
                status: "ready",
                weapons: Some(count),
            }),
        ),
        Err(error) => {
            tracing::warn!(error = %error, "Readiness probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Readiness {
                    status: "unavailable",
                    weapons: None,
                }),
            )
        },
    }
}
