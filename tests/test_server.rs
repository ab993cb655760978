//! HTTP routes, exercised in-process through the router.

#![cfg(feature = "server")]

mod common;

use std::path::{Path, PathBuf};

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use basket_pnl::server::router;
use basket_pnl::{AsyncPnlDashboard, DatabaseConfig, PnlDashboard};
use serde_json::Value;
use tower::ServiceExt;

fn app_for(path: &Path) -> Router {
    let dashboard = PnlDashboard::builder()
        .settings(common::settings_for(path))
        .build()
        .unwrap();
    router(AsyncPnlDashboard::new(dashboard))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn health_endpoint() {
    let tmp = tempfile::tempdir().unwrap();
    let (status, body) = get(app_for(&tmp.path().join("unused.duckdb")), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn index_renders_dashboard() {
    let tmp = tempfile::tempdir().unwrap();
    let path = common::seed_file(tmp.path());

    let (status, html) = get(app_for(&path), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<title>HTTS Live PnL</title>"));
    // 1495.0 total, 1250.25 intraday, 244.75 daily, -75.25 paper
    assert!(html.contains(r#"<div class="value">1495</div>"#));
    assert!(html.contains(r#"<div class="value">1250</div>"#));
    assert!(html.contains(r#"<div class="value">244</div>"#));
    assert!(html.contains(r#"<div class="value">-75</div>"#));
    assert!(html.contains("02-01-2024, 15:30"));
    assert!(html.contains("INTRA Baskets"));
    assert!(!html.contains("ECHO"));
}

#[tokio::test]
async fn refresh_query_is_accepted() {
    let tmp = tempfile::tempdir().unwrap();
    let path = common::seed_file(tmp.path());

    let (status, _) = get(app_for(&path), "/?refresh=true").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn summary_endpoint_returns_json() {
    let tmp = tempfile::tempdir().unwrap();
    let path = common::seed_file(tmp.path());

    let (status, body) = get(app_for(&path), "/api/summary").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["summary"]["total_live"].as_f64(), Some(1495.0));
    assert_eq!(json["summary"]["paper"].as_f64(), Some(common::LATEST_PAPER));
    assert_eq!(json["summary"]["intra_baskets"][0]["name"], "ALPHA");
    assert!(json["notices"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_database_still_answers() {
    let dashboard = PnlDashboard::builder()
        .database(DatabaseConfig::DuckDb {
            path: PathBuf::from("/nonexistent/pnl.duckdb"),
        })
        .settings(Default::default())
        .build()
        .unwrap();
    let app = router(AsyncPnlDashboard::new(dashboard));

    let (status, body) = get(app.clone(), "/api/summary").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "no_data");
    assert_eq!(json["reason"], "baskets");
    assert_eq!(json["notices"][0]["level"], "error");

    let (status, html) = get(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No basket data found."));
    assert!(html.contains("Database Connection Error"));
}
