//! Health check handlers.

use std::collections::BTreeMap;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub datasources: BTreeMap<String, ServiceHealth>,
}

/// Datasource health with optional error message.
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Health check endpoint - verifies connectivity of both datasources.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "All datasources reachable"),
        (status = 503, description = "At least one datasource unreachable")
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Response {
    let mut datasources = BTreeMap::new();
    let mut all_healthy = true;

    for (datasource, result) in state.directory.ping_all().await {
        let health = match result {
            Ok(()) => ServiceHealth {
                status: "healthy".to_string(),
                error: None,
            },
            Err(e) => {
                all_healthy = false;
                ServiceHealth {
                    status: "unhealthy".to_string(),
                    error: Some(e.to_string()),
                }
            }
        };
        datasources.insert(datasource.to_string(), health);
    }

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        datasources,
    };

    if all_healthy {
        (StatusCode::OK, Json(response)).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
    }
}
