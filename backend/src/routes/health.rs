//! Health check endpoints
//!
//! - /health - Basic health check
//! - /health/ready - Readiness probe (pings the user store)
//! - /health/live - Liveness probe

use crate::services::STORE_TIMEOUT;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthChecks>,
}

/// Individual health checks
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
}

/// Status of an individual check
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn simple(status: &str) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
    })
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    simple("healthy")
}

/// Readiness probe
///
/// Returns 503 when the store does not answer within the store timeout.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let ping = tokio::time::timeout(STORE_TIMEOUT, state.users().ping()).await;

    let database = match ping {
        Ok(Ok(())) => CheckStatus {
            status: "healthy".to_string(),
            message: None,
        },
        Ok(Err(_)) => CheckStatus {
            status: "unhealthy".to_string(),
            message: Some("database unavailable".to_string()),
        },
        Err(_) => CheckStatus {
            status: "unhealthy".to_string(),
            message: Some("database ping timed out".to_string()),
        },
    };

    let is_healthy = database.status == "healthy";
    let response = HealthResponse {
        status: if is_healthy { "ready" } else { "not_ready" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(HealthChecks { database }),
    };

    if is_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Liveness probe - always OK while the process serves requests
pub async fn liveness_check() -> Json<HealthResponse> {
    simple("alive")
}
