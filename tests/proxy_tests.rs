//! Relay tests: the axum router in front of a wiremock upstream.

use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use mentor_portal::{app::build_app, config::AppConfig, state::AppState};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_for(upstream: &str) -> Router {
    let state = AppState::init(AppConfig::for_upstream(upstream)).unwrap();
    build_app(state)
}

async fn body_bytes(res: axum::response::Response) -> Vec<u8> {
    to_bytes(res.into_body(), usize::MAX).await.unwrap().to_vec()
}

#[tokio::test]
async fn mirrors_status_and_body() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/modules/user/history"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "nope"})))
        .mount(&upstream)
        .await;

    let res = app_for(&upstream.uri())
        .oneshot(
            Request::get("/api/backend/modules/user/history")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(&body_bytes(res).await).unwrap();
    assert_eq!(body, json!({"message": "nope"}));
}

#[tokio::test]
async fn forwards_only_allowed_headers() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/modules/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&upstream)
        .await;

    let res = app_for(&upstream.uri())
        .oneshot(
            Request::get("/api/backend/modules/profile")
                .header(header::AUTHORIZATION, "Bearer tok")
                .header(header::COOKIE, "sid=secret")
                .header("x-custom", "1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let received = upstream.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    let headers = &received[0].headers;
    assert_eq!(headers.get("authorization").unwrap(), "Bearer tok");
    assert!(headers.get("cache-control").is_none());
    assert!(headers.get("cookie").is_none());
    assert!(headers.get("x-custom").is_none());
}

#[tokio::test]
async fn missing_content_type_defaults_to_json() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"{}".to_vec()))
        .mount(&upstream)
        .await;

    let res = app_for(&upstream.uri())
        .oneshot(Request::get("/api/backend/ping").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(
        res.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn post_body_and_query_reach_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/google/user"))
        .and(query_param("next", "dash"))
        .and(body_json(json!({"token": "cred"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&upstream)
        .await;

    let res = app_for(&upstream.uri())
        .oneshot(
            Request::post("/api/backend/auth/google/user?next=dash")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"token":"cred"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn large_bodies_are_relayed_whole() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/modules/user/requests"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&upstream)
        .await;

    let payload = json!({ "description": "x".repeat(3 * 1024 * 1024) }).to_string();
    let res = app_for(&upstream.uri())
        .oneshot(
            Request::post("/api/backend/modules/user/requests")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.clone()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let received = upstream.received_requests().await.unwrap();
    assert_eq!(received[0].body.len(), payload.len());
}

#[tokio::test]
async fn unreachable_upstream_is_bad_gateway() {
    let res = app_for("http://127.0.0.1:1")
        .oneshot(
            Request::get("/api/backend/modules/profile")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    let body: Value = serde_json::from_slice(&body_bytes(res).await).unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn slow_upstream_is_gateway_timeout() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&upstream)
        .await;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let state = AppState::from_parts(Arc::new(AppConfig::for_upstream(upstream.uri())), http);

    let res = build_app(state)
        .oneshot(Request::get("/api/backend/slow").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn health_and_public_config() {
    let app = app_for("http://127.0.0.1:1");

    let res = app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .oneshot(Request::get("/api/config").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes(res).await).unwrap();
    assert_eq!(body["backendPrefix"], "/api/backend");
    assert!(body["googleClientId"].is_null());
}
