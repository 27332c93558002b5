//! Count summary handler.

use axum::{extract::State, response::Html, routing::get, Router};

use common::AppResult;

use crate::state::AppState;

/// Create summary routes
pub fn demo_routes() -> Router<AppState> {
    Router::new().route("/demo", get(demo))
}

/// Report both working counts of both datasources
#[utoipa::path(
    get,
    path = "/demo",
    tag = "Summary",
    responses(
        (status = 200, description = "Four routine counts: primary, primary 2, secondary, secondary 2", body = String, content_type = "text/html"),
        (status = 500, description = "A routine call failed")
    )
)]
pub async fn demo(State(state): State<AppState>) -> AppResult<Html<String>> {
    let counts = state.directory.counts().await?;

    Ok(Html(format!(
        "Person count1: {}<br>Person count12: {}<br>Person count2: {}<br>Person count22: {}",
        counts.primary_count,
        counts.primary_count_2,
        counts.secondary_count,
        counts.secondary_count_2,
    )))
}
