use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, StatusCode};
use routine_relay::{Relay, RelayConfigBuilder};
use routine_test_provider::{PresetResponse, StubServer};
use serde_json::{Value, json};
use tower::ServiceExt;

fn relay_for(server: &StubServer) -> Router {
    let config = RelayConfigBuilder::with_api_key("sk-test-key")
        .with_base_url(format!("{}/v1", server.url()))
        .build();
    Relay::new(config).into_router()
}

fn no_presets() -> Vec<PresetResponse> {
    Vec::new()
}

fn post(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

fn header<'a>(resp: &'a Response<Body>, name: &str) -> Option<&'a str> {
    resp.headers().get(name).and_then(|v| v.to_str().ok())
}

async fn body_bytes(resp: Response<Body>) -> Vec<u8> {
    to_bytes(resp.into_body(), usize::MAX).await.unwrap().to_vec()
}

fn chat_request() -> Value {
    json!({
        "messages": [{ "role": "user", "content": "hi" }],
        "model": "gpt-4o",
        "temperature": 0.7,
        "max_tokens": 1000
    })
}

#[tokio::test]
async fn test_preflight() {
    let server = StubServer::spawn(no_presets()).await.unwrap();
    let resp = relay_for(&server)
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "access-control-allow-origin"), Some("*"));
    assert_eq!(
        header(&resp, "access-control-allow-methods"),
        Some("POST, OPTIONS")
    );
    assert_eq!(
        header(&resp, "access-control-allow-headers"),
        Some("Content-Type")
    );
    assert!(body_bytes(resp).await.is_empty());
    assert_eq!(server.request_count(), 0);
}

#[tokio::test]
async fn test_other_methods_rejected() {
    let server = StubServer::spawn(no_presets()).await.unwrap();
    for method in ["GET", "PUT", "DELETE"] {
        let resp = relay_for(&server)
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body_bytes(resp).await, b"Method not allowed");
    }
    assert_eq!(server.request_count(), 0);
}

#[tokio::test]
async fn test_forwards_with_credential() {
    let reply = json!({ "choices": [{ "message": { "content": "hello" } }] });
    let server = StubServer::spawn([PresetResponse::with_json(reply.clone())])
        .await
        .unwrap();

    let resp = relay_for(&server)
        .oneshot(post(chat_request().to_string()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "access-control-allow-origin"), Some("*"));
    assert_eq!(header(&resp, "content-type"), Some("application/json"));
    let body: Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert_eq!(body, reply);

    let received = server.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].path, "/v1/chat/completions");
    assert_eq!(received[0].header("authorization"), Some("Bearer sk-test-key"));
    assert_eq!(received[0].json(), Some(chat_request()));
}

#[tokio::test]
async fn test_status_passthrough() {
    let error = json!({
        "error": { "message": "Rate limit reached", "type": "requests" }
    });
    let server = StubServer::spawn([
        PresetResponse::with_json(error.clone()).with_status(429),
    ])
    .await
    .unwrap();

    let resp = relay_for(&server)
        .oneshot(post(chat_request().to_string()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert_eq!(body, error);
}

#[tokio::test]
async fn test_malformed_request_body() {
    let server = StubServer::spawn(no_presets()).await.unwrap();

    let resp = relay_for(&server)
        .oneshot(post("{\"messages\": ["))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header(&resp, "access-control-allow-origin"), Some("*"));
    let body: Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("invalid request body")
    );
    assert_eq!(server.request_count(), 0);
}

#[tokio::test]
async fn test_malformed_provider_reply() {
    let server = StubServer::spawn([PresetResponse::with_text("<html>oops")])
        .await
        .unwrap();

    let resp = relay_for(&server)
        .oneshot(post(chat_request().to_string()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_unreachable_provider() {
    // Nothing listens on port 1.
    let config = RelayConfigBuilder::with_api_key("sk-test-key")
        .with_base_url("http://127.0.0.1:1/v1")
        .build();

    let resp = Relay::new(config)
        .into_router()
        .oneshot(post(chat_request().to_string()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("provider request failed")
    );
}

#[tokio::test]
async fn test_large_request_is_forwarded() {
    let reply = json!({ "choices": [{ "message": { "content": "ok" } }] });
    let server = StubServer::spawn([PresetResponse::with_json(reply.clone())])
        .await
        .unwrap();

    // A long replayed conversation, well past axum's default body limit.
    let history: Vec<Value> = (0..3000)
        .map(|i| {
            let role = if i % 2 == 0 { "user" } else { "assistant" };
            json!({ "role": role, "content": "x".repeat(1000) })
        })
        .collect();
    let mut request = chat_request();
    request["messages"] = Value::Array(history);

    let resp = relay_for(&server)
        .oneshot(post(request.to_string()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "access-control-allow-origin"), Some("*"));
    let body: Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert_eq!(body, reply);

    let received = server.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].json(), Some(request));
}
