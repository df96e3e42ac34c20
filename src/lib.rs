//! Budget dashboard: compares simulated trading budgets with market
//! close/volume statistics across companies.

pub mod callbacks;
pub mod config;
pub mod data;
pub mod error;
pub mod figure;
pub mod layout;
pub mod routes;
pub mod state;

use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use state::AppState;

/// Full application router: JSON API plus the static page as fallback.
pub fn app(state: Arc<AppState>) -> Router {
    let static_dir = state.config.frontend_dir.clone();

    Router::new()
        .merge(routes::api_router())
        .fallback_service(ServeDir::new(&static_dir).append_index_html_on_directories(true))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
