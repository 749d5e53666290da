//! API endpoint integration tests
//!
//! Exercises the router without reaching any external service.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use aria_relay::Config;
use aria_relay::api::{ApiState, router};
use aria_relay::audio::DeviceProfile;

/// Build a test router with a dummy API key
fn build_test_router() -> axum::Router {
    let config = Config {
        api_key: "test-api-key".to_string(),
        stt_model: "whisper-large-v3-turbo".to_string(),
        llm_model: "llama-3.3-70b-versatile".to_string(),
        system_prompt: "You are a test assistant.".to_string(),
        llm_max_tokens: 150,
        llm_temperature: 0.7,
        tts_model: "canopylabs/orpheus-v1-english".to_string(),
        tts_voice: "autumn".to_string(),
        fallback_lang: "en".to_string(),
        device: DeviceProfile::default(),
    };

    let state = Arc::new(ApiState::from_config(config).expect("state should build"));
    router(state)
}

#[tokio::test]
async fn status_endpoint_reports_service() {
    let app = build_test_router();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "aria relay running");
    assert!(json["version"].is_string());
    assert_eq!(json["endpoints"][0], "/voice");
}

#[tokio::test]
async fn voice_rejects_empty_body() {
    let app = build_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/voice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "bad_request");
}

#[tokio::test]
async fn voice_requires_post() {
    let app = build_test_router();

    let response = app
        .oneshot(Request::builder().uri("/voice").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
