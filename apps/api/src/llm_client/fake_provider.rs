//! In-process stand-in for the Gemini `generateContent` endpoint, used by tests.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use tokio::sync::mpsc;

/// What the fake provider saw for a single call.
#[derive(Debug)]
pub struct CapturedRequest {
    /// Last path segment, e.g. `gemini-test:generateContent`.
    pub call: String,
    pub api_key: Option<String>,
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct FakeProvider {
    tx: mpsc::UnboundedSender<CapturedRequest>,
    status: StatusCode,
    reply: &'static str,
}

async fn fake_generate(
    State(provider): State<FakeProvider>,
    Path(call): Path<String>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };
    let _ = provider.tx.send(CapturedRequest {
        call,
        api_key: header("x-goog-api-key"),
        content_type: header("content-type"),
        body: serde_json::from_str(&body).unwrap_or(serde_json::Value::Null),
    });
    (provider.status, provider.reply.to_string())
}

/// Starts a fake provider on an ephemeral port. Returns its base URL
/// (suitable for `LlmConfig::base_url`) and a receiver of captured requests.
pub async fn spawn_fake_provider(
    status: StatusCode,
    reply: &'static str,
) -> (String, mpsc::UnboundedReceiver<CapturedRequest>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let app = Router::new()
        .route("/v1beta/models/:call", post(fake_generate))
        .with_state(FakeProvider { tx, status, reply });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/v1beta"), rx)
}

/// A base URL pointing at a port nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/v1beta")
}
