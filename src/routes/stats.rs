use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

use crate::callbacks::{stats_figure, DateRange, Metric};
use crate::error::DashError;
use crate::figure::Figure;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatsFigureBody {
    /// Stats table key, as listed by `stats-company-selector`.
    pub company: String,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    pub range: DateRange,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/stats/figure", post(api_stats_figure))
}

async fn api_stats_figure(
    State(state): State<Arc<AppState>>,
    Json(body): Json<StatsFigureBody>,
) -> Result<Json<Figure>, DashError> {
    let fig = stats_figure(&state.store, &body.company, &body.metrics, body.range)?;
    Ok(Json(fig))
}
