//! Router-level tests for the HTTP surface
//!
//! These drive the real router with `oneshot` requests. The pool is lazily
//! connected, so every path that rejects before touching the database runs
//! without a MySQL server.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use std::sync::Arc;
use tower::ServiceExt;

use item_api::config::Config;
use item_api::db;
use item_api::handlers::AppState;
use item_api::server::create_router;

fn test_app() -> axum::Router {
    let config = Config::default();
    let pool = db::connect_pool(&config.database).expect("lazy pool");
    create_router(AppState {
        pool,
        config: Arc::new(config),
    })
}

fn post_items(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/items/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn root_returns_running_message() {
    let app = test_app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "API running");
}

#[tokio::test]
async fn create_item_rejects_empty_name() {
    let app = test_app();

    let response = app.oneshot(post_items(r#"{"name": ""}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["error"]["type"], "validation_error");
    assert_eq!(json["error"]["field"], "name");
}

#[tokio::test]
async fn create_item_rejects_oversized_name() {
    let app = test_app();
    let payload = format!(r#"{{"name": "{}"}}"#, "x".repeat(256));

    let response = app.oneshot(post_items(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["error"]["field"], "name");
}

#[tokio::test]
async fn create_item_rejects_overprecise_price() {
    let app = test_app();

    let response = app
        .oneshot(post_items(r#"{"name": "Widget", "price": "19.999"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["error"]["type"], "validation_error");
    assert_eq!(json["error"]["field"], "price");
}

#[tokio::test]
async fn create_item_rejects_price_out_of_range() {
    let app = test_app();

    let response = app
        .oneshot(post_items(r#"{"name": "Widget", "price": "123456789.00"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["error"]["field"], "price");
}

#[tokio::test]
async fn create_item_rejects_malformed_body() {
    let app = test_app();

    let response = app.oneshot(post_items("{not json")).await.unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn create_item_rejects_missing_name() {
    let app = test_app();

    let response = app
        .oneshot(post_items(r#"{"price": "19.99"}"#))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/items")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
