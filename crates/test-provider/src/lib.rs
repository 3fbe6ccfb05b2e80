//! A local stub HTTP peer for testing purpose.
//!
//! The stub listens on a random loopback port and answers every request,
//! whatever its method or path, with the next response of a preset
//! script. It records what it received so tests can assert on the
//! forwarded payloads and headers.
//!
//! # Note
//!
//! This type is not meant for production use. Requests are buffered in
//! memory and never cleaned up until the server is dropped.

mod preset;

use std::collections::VecDeque;
use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::Router;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio::time::sleep;

pub use preset::*;

/// A request the stub has received.
#[derive(Clone, Debug)]
pub struct ReceivedRequest {
    /// Request method.
    pub method: Method,
    /// Request path, without the query.
    pub path: String,
    /// Request headers.
    pub headers: HeaderMap,
    /// Raw request body.
    pub body: Bytes,
}

impl ReceivedRequest {
    /// Returns a header value if it is present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Parses the body as JSON.
    pub fn json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

enum Script {
    Queue(VecDeque<PresetResponse>),
    Always(PresetResponse),
}

struct StubState {
    script: Mutex<Script>,
    received: Mutex<Vec<ReceivedRequest>>,
}

impl StubState {
    fn next_preset(&self) -> Option<PresetResponse> {
        match &mut *lock(&self.script) {
            Script::Queue(queue) => queue.pop_front(),
            Script::Always(preset) => Some(preset.clone()),
        }
    }
}

/// A stub HTTP server answering with preset responses.
///
/// The server task is aborted when this value is dropped.
pub struct StubServer {
    addr: SocketAddr,
    state: Arc<StubState>,
    task: JoinHandle<()>,
}

impl StubServer {
    /// Starts a server that answers requests with `script` in order.
    ///
    /// Once the script runs out, every request gets a `500` reply.
    pub async fn spawn<I>(script: I) -> io::Result<Self>
    where
        I: IntoIterator<Item = PresetResponse>,
    {
        Self::start(Script::Queue(script.into_iter().collect())).await
    }

    /// Starts a server that answers every request with `preset`.
    pub async fn always(preset: PresetResponse) -> io::Result<Self> {
        Self::start(Script::Always(preset)).await
    }

    async fn start(script: Script) -> io::Result<Self> {
        let state = Arc::new(StubState {
            script: Mutex::new(script),
            received: Mutex::new(Vec::new()),
        });
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let addr = listener.local_addr()?;

        let app = Router::new()
            .fallback(respond)
            .layer(DefaultBodyLimit::disable())
            .with_state(Arc::clone(&state));
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self { addr, state, task })
    }

    /// Returns the base URL of the server, e.g. `http://127.0.0.1:4567`.
    #[inline]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Returns a snapshot of the received requests, oldest first.
    pub fn received(&self) -> Vec<ReceivedRequest> {
        lock(&self.state.received).clone()
    }

    /// Returns how many requests have been received.
    pub fn request_count(&self) -> usize {
        lock(&self.state.received).len()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn respond(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    lock(&state.received).push(ReceivedRequest {
        method,
        path: uri.path().to_owned(),
        headers,
        body,
    });

    let Some(preset) = state.next_preset() else {
        return (StatusCode::INTERNAL_SERVER_ERROR, "no preset response left")
            .into_response();
    };
    if let Some(delay) = preset.delay {
        sleep(delay).await;
    }

    let status = StatusCode::from_u16(preset.status)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match preset.body {
        PresetBody::Json(value) => (status, axum::Json(value)).into_response(),
        PresetBody::Text(text) => (status, text).into_response(),
    }
}

#[inline]
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_script_order() {
        let server = StubServer::spawn([
            PresetResponse::with_reply("first"),
            PresetResponse::with_text("slow down").with_status(429),
        ])
        .await
        .unwrap();
        let client = reqwest::Client::new();

        let resp = client
            .post(format!("{}/v1/chat/completions", server.url()))
            .bearer_auth("sk-test")
            .json(&json!({ "messages": [] }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["choices"][0]["message"]["content"], "first");

        let resp = client.get(server.url()).send().await.unwrap();
        assert_eq!(resp.status().as_u16(), 429);
        assert_eq!(resp.text().await.unwrap(), "slow down");

        let resp = client.get(server.url()).send().await.unwrap();
        assert_eq!(resp.status().as_u16(), 500);

        let received = server.received();
        assert_eq!(received.len(), 3);
        assert_eq!(received[0].method, Method::POST);
        assert_eq!(received[0].path, "/v1/chat/completions");
        assert_eq!(received[0].header("authorization"), Some("Bearer sk-test"));
        assert_eq!(received[0].json(), Some(json!({ "messages": [] })));
    }

    #[tokio::test]
    async fn test_always() {
        let server = StubServer::always(PresetResponse::with_json(json!({})))
            .await
            .unwrap();
        let client = reqwest::Client::new();
        for _ in 0..3 {
            let resp = client.get(server.url()).send().await.unwrap();
            assert_eq!(resp.status().as_u16(), 200);
        }
        assert_eq!(server.request_count(), 3);
    }
}
