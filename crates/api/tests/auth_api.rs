//! HTTP-level tests for the demo login endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json};

#[tokio::test]
async fn login_returns_stable_token_per_email() {
    let (app, _) = common::build_test_app();
    let body = serde_json::json!({"name": "Ops", "email": "ops@example.com"});

    let first = post_json(&app, "/api/login", body.clone()).await;
    assert_eq!(first.status(), StatusCode::OK);
    let first = body_json(first).await;
    assert_eq!(first["name"], "Ops");
    assert_eq!(first["email"], "ops@example.com");

    let token = first["token"].as_str().unwrap();
    assert!(token.starts_with("tok-"));
    assert_eq!(token.len(), 20);

    let second = body_json(post_json(&app, "/api/login", body).await).await;
    assert_eq!(second["token"], token);
}

#[tokio::test]
async fn login_accepts_free_form_email() {
    let (app, _) = common::build_test_app();
    let response = post_json(
        &app,
        "/api/login",
        serde_json::json!({"name": "Ops", "email": "ops"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["email"], "ops");
    assert!(json["token"].as_str().unwrap().starts_with("tok-"));
}

#[tokio::test]
async fn login_without_email_returns_400() {
    let (app, _) = common::build_test_app();
    let response = post_json(&app, "/api/login", serde_json::json!({"name": "Ops"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
