//! Health check endpoints.
//!
//! `/health` is a liveness probe and touches nothing. `/ready` performs a
//! one-entry listing against the record store.

use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use hxtodo_core::{ListSelector, TODO_NAMESPACE};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: &'static str,
    /// Service version
    pub version: &'static str,
}

/// `GET /health`: 200 while the process is serving requests.
///
/// ```bash
/// curl http://localhost:8080/health
/// # {"status":"ok","version":"0.1.0"}
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    /// Overall readiness status
    pub ready: bool,
    /// Record store reachability
    pub store: bool,
}

/// `GET /ready`: 200 if the store answers a listing, 503 otherwise.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let probe = ListSelector::prefix(TODO_NAMESPACE).limit(1);
    let store = match state.repo.store().list(&probe).await {
        Ok(_) => true,
        Err(error) => {
            tracing::warn!(error = %error, "Readiness probe failed");
            false
        },
    };

    let status = if store {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(ReadinessResponse { ready: store, store }))
}
