//! Integration tests for the health endpoints.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use ticketloop_api::{create_router, AppState};
use ticketloop_testing::TestEnv;
use tower::ServiceExt;

#[tokio::test]
async fn health_returns_fixed_acknowledgement() {
    let env = TestEnv::new().await.expect("test env setup");
    let app = create_router(AppState::new(env.service()));

    let response = app
        .oneshot(
            Request::builder().method("GET").uri("/health").body(Body::empty()).unwrap(),
        )
        .await
        .expect("execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn readiness_reports_ready_with_live_database() {
    let env = TestEnv::new().await.expect("test env setup");
    let app = create_router(AppState::new(env.service()));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health/ready")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ready");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let env = TestEnv::new().await.expect("test env setup");
    let app = create_router(AppState::new(env.service()));

    let response = app
        .oneshot(
            Request::builder().method("GET").uri("/health").body(Body::empty()).unwrap(),
        )
        .await
        .expect("execute request");

    assert!(response.headers().contains_key("X-Request-Id"));
}
