//! HTTP surface: every endpoint driven through the full router.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use budget_dash::config::DashConfig;
use budget_dash::data::{load_data_store, LoadOptions};
use budget_dash::state::AppState;

/// 2021-01-01 10:00:00 UTC plus `days`.
fn secs(days: i64) -> f64 {
    (1_609_495_200 + days * 86_400) as f64
}

struct Fixture {
    dir: PathBuf,
    app: Router,
}

impl Drop for Fixture {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.dir).ok();
    }
}

fn write(dir: &Path, name: &str, body: &str) {
    std::fs::write(dir.join(name), body).unwrap();
}

fn fixture(tag: &str) -> Fixture {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("budget_dash_http_{tag}_{nanos}"));
    std::fs::create_dir_all(&dir).unwrap();

    write(
        &dir,
        "SBER38.csv",
        "\
datetime,budget,strategy,color
2021-01-01 10:00:00,100,long,gray
2021-01-02 10:00:00,150,long,green
2021-01-03 10:00:00,90,short,red
",
    );
    write(
        &dir,
        "GAZP38.csv",
        "\
datetime,budget,strategy,color
2021-01-01 10:00:00,10,hold,gray
2021-01-20 10:00:00,12,hold,green
",
    );
    write(
        &dir,
        "SBER_1_min.csv",
        "\
utc,close,volume
2021-01-01T10:00:00.000000,270.1,1000
2021-01-02T10:00:00,271.5,900
2021-01-03 10:00:00.250,268.0,1500
",
    );

    let store = load_data_store(&dir, &LoadOptions::default()).unwrap();
    let config = DashConfig {
        frontend_dir: dir.join("frontend"),
        ..DashConfig::default()
    };
    let app = budget_dash::app(AppState::new(config, store));
    Fixture { dir, app }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, req).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

fn assert_error(status: StatusCode, body: &Value, needle: &str) {
    assert_eq!(status, StatusCode::NOT_FOUND, "{body}");
    let msg = body["error"].as_str().unwrap_or_default();
    assert!(msg.contains(needle), "{body}");
}

#[tokio::test]
async fn health_and_layout() {
    let fx = fixture("page");

    let (status, body) = get(&fx.app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let (status, body) = get(&fx.app, "/api/layout").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["panels"].as_array().unwrap().len(), 3);
    assert_eq!(body["panels"][0]["controls"][0]["kind"], "checklist");
}

#[tokio::test]
async fn selection_keeps_the_last_two() {
    let fx = fixture("selection");

    let (status, body) = post(
        &fx.app,
        "/api/budget/selection",
        json!({ "selected": ["SBER", "GAZP", "LKOH"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "selected": ["GAZP", "LKOH"] }));
}

#[tokio::test]
async fn budget_figure_endpoint() {
    let fx = fixture("budget");

    let (status, body) = post(
        &fx.app,
        "/api/budget/figure",
        json!({ "companies": ["SBER", "GAZP"], "range": [secs(0), secs(1)] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let traces = body["data"].as_array().unwrap();
    assert_eq!(traces.len(), 2);
    assert_eq!(traces[0]["name"], "SBER");
    assert_eq!(traces[0]["y"], json!([100.0, 150.0]));
    assert_eq!(traces[1]["y"], json!([10.0]));

    let (status, body) = post(
        &fx.app,
        "/api/budget/figure",
        json!({ "companies": ["ACME"], "range": [secs(0), secs(1)] }),
    )
    .await;
    assert_error(status, &body, "ACME");
}

#[tokio::test]
async fn strategy_endpoints() {
    let fx = fixture("strategy");

    let (status, body) = get(&fx.app, "/api/strategy/options?company=SBER").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "options": [
            { "label": "long", "value": "long" },
            { "label": "short", "value": "short" },
        ] })
    );

    let (status, body) = get(&fx.app, "/api/strategy/options?company=ACME").await;
    assert_error(status, &body, "ACME");

    let (status, body) = post(
        &fx.app,
        "/api/strategy/figure",
        json!({ "company": "SBER", "strategies": ["long"], "range": [secs(1), secs(2)] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let points: usize = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["y"].as_array().unwrap().len())
        .sum();
    assert_eq!(points, 1);

    let (status, body) = post(
        &fx.app,
        "/api/strategy/figure",
        json!({ "company": "ACME", "strategies": ["long"], "range": [secs(0), secs(2)] }),
    )
    .await;
    assert_error(status, &body, "ACME");
}

#[tokio::test]
async fn stats_figure_endpoint() {
    let fx = fixture("stats");

    let (status, body) = post(
        &fx.app,
        "/api/stats/figure",
        json!({ "company": "SBER", "metrics": ["budget", "close"], "range": [secs(1), secs(2)] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let traces = body["data"].as_array().unwrap();
    assert_eq!(traces.len(), 2);
    assert_eq!(traces[0]["y"], json!([150.0, 90.0]));
    assert_eq!(traces[1]["y"], json!([271.5, 268.0]));
    assert_eq!(traces[1]["yaxis"], "y2");

    // GAZP has a budget table but no stats table.
    let (status, body) = post(
        &fx.app,
        "/api/stats/figure",
        json!({ "company": "GAZP", "metrics": ["budget"], "range": [secs(0), secs(19)] }),
    )
    .await;
    assert_error(status, &body, "GAZP");
}
