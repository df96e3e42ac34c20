use std::sync::Arc;

use crate::config::DashConfig;
use crate::data::DataStore;
use crate::layout::{build_page, Page};

/// Shared application state, passed to all route handlers via `axum::extract::State`.
///
/// Everything here is built before the listener starts and never mutated.
pub struct AppState {
    pub config: DashConfig,
    pub store: DataStore,
    pub page: Page,
}

impl AppState {
    pub fn new(config: DashConfig, store: DataStore) -> Arc<Self> {
        let page = build_page(&store, config.tick_days);
        Arc::new(Self {
            config,
            store,
            page,
        })
    }
}
