use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::DashError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/api/layout", get(api_layout))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /api/layout — the page declaration with defaults filled in.
async fn api_layout(State(state): State<Arc<AppState>>) -> Result<Json<Value>, DashError> {
    Ok(Json(serde_json::to_value(&state.page)?))
}
