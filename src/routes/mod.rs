pub mod budget;
pub mod page;
pub mod stats;
pub mod strategy;

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// Assemble the API router.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(page::routes())
        .merge(budget::routes())
        .merge(strategy::routes())
        .merge(stats::routes())
}
