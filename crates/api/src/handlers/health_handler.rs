//! Health check handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde::Serialize;
use utoipa::ToSchema;

use common::StorageBackend;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub storage: StorageHealth,
}

/// Storage backend health with optional error message.
#[derive(Debug, Serialize, ToSchema)]
pub struct StorageHealth {
    pub backend: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Health check endpoint - pings the database when one is configured.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service and storage are healthy", body = HealthResponse),
        (status = 503, description = "Storage is unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let ping = match &state.database {
        Some(db) => db.ping().await.map_err(|e| e.to_string()),
        None => Ok(()),
    };

    let (status_code, response) = health_report(&state.service_name, state.backend, ping);
    (status_code, Json(response))
}

/// Map a storage ping outcome to the health status code and body.
fn health_report(
    service_name: &str,
    backend: StorageBackend,
    ping: Result<(), String>,
) -> (StatusCode, HealthResponse) {
    let healthy = ping.is_ok();
    let storage = StorageHealth {
        backend: backend.to_string(),
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        error: ping.err(),
    };

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        service: service_name.to_string(),
        storage,
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_ping_is_healthy() {
        let (status, response) = health_report("user-api", StorageBackend::Postgres, Ok(()));

        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.status, "healthy");
        assert_eq!(response.service, "user-api");
        assert_eq!(response.storage.backend, "postgres");
        assert_eq!(response.storage.status, "healthy");
        assert_eq!(response.storage.error, None);
    }

    #[test]
    fn failed_ping_is_degraded_with_503() {
        let ping = Err("connection refused".to_string());

        let (status, response) = health_report("user-api", StorageBackend::Postgres, ping);

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.status, "degraded");
        assert_eq!(response.storage.status, "unhealthy");
        assert_eq!(
            response.storage.error.as_deref(),
            Some("connection refused")
        );
    }
}
