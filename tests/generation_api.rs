#![allow(clippy::unwrap_used)]
//! Generation client tests against a local OpenAI-compatible stub server.

use std::sync::{Arc, Mutex};

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::post;
use serde_json::{Value, json};

use parley::generation::{
    DEFAULT_CHAT_MODEL, DEFAULT_IMAGE_MODEL, GenerationClient, GenerationError, Generator,
};

type RequestLog = Arc<Mutex<Vec<(Option<String>, Value)>>>;

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    response: Value,
    requests: RequestLog,
}

async fn stub_handler(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    state.requests.lock().unwrap().push((auth, body));
    (state.status, Json(state.response.clone()))
}

/// Serve a canned response for both generation endpoints, recording every
/// request. Returns the service base URL and the request log.
async fn stub_service(status: StatusCode, response: Value) -> (String, RequestLog) {
    let requests: RequestLog = Arc::default();
    let state = StubState {
        status,
        response,
        requests: Arc::clone(&requests),
    };
    let app = axum::Router::new()
        .route("/v1/chat/completions", post(stub_handler))
        .route("/v1/images/generations", post(stub_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), requests)
}

#[tokio::test]
async fn complete_returns_the_first_candidate() {
    let (endpoint, requests) = stub_service(
        StatusCode::OK,
        json!({"choices": [{"message": {"role": "assistant", "content": "Bonjour"}}]}),
    )
    .await;
    let client = GenerationClient::new(endpoint, "sk-test");

    let result = client
        .complete("Translate `Good morning` to `French`")
        .await
        .unwrap();
    assert_eq!(result, "Bonjour");

    let requests = requests.lock().unwrap();
    let (auth, body) = &requests[0];
    assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
    assert_eq!(body["model"], DEFAULT_CHAT_MODEL);
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(
        body["messages"][0]["content"],
        "Translate `Good morning` to `French`"
    );
}

#[tokio::test]
async fn complete_is_idempotent_for_identical_prompts() {
    let (endpoint, requests) = stub_service(
        StatusCode::OK,
        json!({"choices": [{"message": {"role": "assistant", "content": "deterministic"}}]}),
    )
    .await;
    let client = GenerationClient::new(endpoint, "sk-test");

    let first = client.complete("same prompt").await.unwrap();
    let second = client.complete("same prompt").await.unwrap();

    assert_eq!(first, second);
    // The adapter holds no state between calls: both requests are identical.
    let requests = requests.lock().unwrap();
    assert_eq!(requests[0], requests[1]);
}

#[tokio::test]
async fn complete_maps_service_errors() {
    let (endpoint, _requests) = stub_service(
        StatusCode::TOO_MANY_REQUESTS,
        json!({"error": {"message": "quota exceeded"}}),
    )
    .await;
    let client = GenerationClient::new(endpoint, "sk-test");

    let err = client.complete("anything").await.unwrap_err();
    match err {
        GenerationError::Api { status, body } => {
            assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
            assert!(body.contains("quota exceeded"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn complete_rejects_empty_candidate_lists() {
    let (endpoint, _requests) = stub_service(StatusCode::OK, json!({"choices": []})).await;
    let client = GenerationClient::new(endpoint, "sk-test");

    let err = client.complete("anything").await.unwrap_err();
    assert!(matches!(err, GenerationError::EmptyResponse));
}

#[tokio::test]
async fn complete_rejects_empty_candidate_text() {
    let (endpoint, _requests) = stub_service(
        StatusCode::OK,
        json!({"choices": [{"message": {"role": "assistant", "content": ""}}]}),
    )
    .await;
    let client = GenerationClient::new(endpoint, "sk-test");

    let err = client.complete("anything").await.unwrap_err();
    assert!(matches!(err, GenerationError::EmptyResponse));
}

#[tokio::test]
async fn generate_image_returns_the_first_url() {
    let (endpoint, requests) = stub_service(
        StatusCode::OK,
        json!({"data": [{"url": "https://images.example/fox.png"}]}),
    )
    .await;
    let client = GenerationClient::new(endpoint, "sk-test");

    let url = client.generate_image("a red fox").await.unwrap();
    assert_eq!(url, "https://images.example/fox.png");

    let requests = requests.lock().unwrap();
    let (_, body) = &requests[0];
    assert_eq!(body["model"], DEFAULT_IMAGE_MODEL);
    assert_eq!(body["prompt"], "a red fox");
    assert_eq!(body["n"], 1);
}

#[tokio::test]
async fn generate_image_honors_the_configured_model() {
    let (endpoint, requests) = stub_service(
        StatusCode::OK,
        json!({"data": [{"url": "https://images.example/fox.png"}]}),
    )
    .await;
    let client = GenerationClient::new(endpoint, "sk-test").with_image_model("dall-e-3");

    client.generate_image("a red fox").await.unwrap();

    let requests = requests.lock().unwrap();
    assert_eq!(requests[0].1["model"], "dall-e-3");
}

#[tokio::test]
async fn generate_image_rejects_empty_data() {
    let (endpoint, _requests) = stub_service(StatusCode::OK, json!({"data": []})).await;
    let client = GenerationClient::new(endpoint, "sk-test");

    let err = client.generate_image("a red fox").await.unwrap_err();
    assert!(matches!(err, GenerationError::EmptyResponse));
}
