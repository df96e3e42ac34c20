use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::callbacks::{strategy_figure, strategy_options, DateRange};
use crate::error::DashError;
use crate::figure::Figure;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CompanyQuery {
    company: String,
}

#[derive(Debug, Deserialize)]
pub struct StrategyFigureBody {
    pub company: String,
    #[serde(default)]
    pub strategies: Vec<String>,
    pub range: DateRange,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/strategy/options", get(api_strategy_options))
        .route("/api/strategy/figure", post(api_strategy_figure))
}

async fn api_strategy_options(
    State(state): State<Arc<AppState>>,
    Query(q): Query<CompanyQuery>,
) -> Result<Json<Value>, DashError> {
    let options = strategy_options(&state.store, &q.company)?;
    Ok(Json(json!({ "options": options })))
}

async fn api_strategy_figure(
    State(state): State<Arc<AppState>>,
    Json(body): Json<StrategyFigureBody>,
) -> Result<Json<Figure>, DashError> {
    let fig = strategy_figure(&state.store, &body.company, &body.strategies, body.range)?;
    Ok(Json(fig))
}
