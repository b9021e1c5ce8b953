//! Health check handler

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::RepositoryProvider;

/// Health check state
#[derive(Clone)]
pub struct HealthState {
    pub repos: Arc<dyn RepositoryProvider>,
    /// Storage driver name reported in the response
    pub storage: &'static str,
    pub started_at: Arc<Instant>,
}

/// Service health response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: ComponentHealth,
}

/// Component health status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealth {
    pub driver: String,
    pub status: String,
    pub latency_ms: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let db_start = Instant::now();
    let (status, latency_ms) = match state.repos.ping().await {
        Ok(()) => ("ok", Some(db_start.elapsed().as_millis() as u64)),
        Err(e) => {
            tracing::warn!(error = %e, "Health check: store ping failed");
            ("error", None)
        }
    };

    let http_status = if status == "ok" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        http_status,
        Json(HealthResponse {
            status: if status == "ok" { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.started_at.elapsed().as_secs(),
            database: ComponentHealth {
                driver: state.storage.to_string(),
                status: status.to_string(),
                latency_ms,
            },
        }),
    )
}
