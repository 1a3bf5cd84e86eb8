use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use serde_json::Value as JsonValue;
use tower::ServiceExt;

// Liveness and the simple health endpoint deliberately touch no
// dependencies, so they are exercised through the router without a running
// database or cache.
#[tokio::test]
async fn liveness_and_simple_health_endpoints() {
    dotenvy::dotenv().ok();
    env::set_var("DATABASE_URL", "postgres://localhost/cinebase_test");
    let _ = cinebase_backend::config::init_config();

    let app = Router::new()
        .route(
            "/api/v1/health/live",
            get(cinebase_backend::routes::health::live),
        )
        .route(
            "/api/v1/health/simple",
            get(cinebase_backend::routes::health::simple),
        );

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/health/live")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "alive");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health/simple")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
    assert!(body["timestamp"].is_string());
}
