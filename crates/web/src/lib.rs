//! Person Web Library
//!
//! HTTP front end over both person datasources: the count summary, the
//! person management pages and the stored procedure report.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod views;

use std::sync::Arc;

use tracing::info;

use common::{AppError, AppResult};
use person_service_lib::config::PersonServiceConfig;

use crate::config::WebConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Connect both datasources and serve HTTP until shutdown.
pub async fn run_server(config: WebConfig, service_config: PersonServiceConfig) -> AppResult<()> {
    let directory = Arc::new(person_service_lib::connect(&service_config).await?);

    let addr = config.server_addr();
    let state = AppState::new(directory);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
