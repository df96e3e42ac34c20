use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::callbacks::{budget_figure, clamp_selection, DateRange};
use crate::error::DashError;
use crate::figure::Figure;
use crate::state::AppState;

/// Body and response of POST /api/budget/selection.
#[derive(Debug, Deserialize, Serialize)]
pub struct Selection {
    #[serde(default)]
    pub selected: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct BudgetFigureBody {
    #[serde(default)]
    pub companies: Vec<String>,
    pub range: DateRange,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/budget/selection", post(api_selection))
        .route("/api/budget/figure", post(api_budget_figure))
}

async fn api_selection(Json(body): Json<Selection>) -> Json<Selection> {
    Json(Selection {
        selected: clamp_selection(&body.selected),
    })
}

async fn api_budget_figure(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BudgetFigureBody>,
) -> Result<Json<Figure>, DashError> {
    let fig = budget_figure(&state.store, &body.companies, body.range)?;
    Ok(Json(fig))
}
