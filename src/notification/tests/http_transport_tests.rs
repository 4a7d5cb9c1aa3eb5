//! Tests for the `reqwest` transport against a local callback endpoint.

use crate::correlation::domain::{CorrelationKey, Round};
use crate::notification::{
    adapters::ReqwestCallbackTransport,
    domain::NotificationPayload,
    ports::{CallbackTransport, DeliveryError},
};
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    routing::post,
};
use rstest::{fixture, rstest};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Default)]
struct Captured {
    requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn accept(
    State(captured): State<Captured>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned);
    if let Ok(mut requests) = captured.requests.lock() {
        requests.push((content_type, body));
    }
    StatusCode::OK
}

async fn reject() -> StatusCode {
    StatusCode::SERVICE_UNAVAILABLE
}

async fn stall() -> StatusCode {
    tokio::time::sleep(Duration::from_secs(5)).await;
    StatusCode::OK
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        let _served = axum::serve(listener, router).await;
    });
    addr
}

#[fixture]
fn payload() -> NotificationPayload {
    let key = CorrelationKey::new("a@x.com", "t1", Round::new(2), "n1");
    NotificationPayload::new(&key, "https://example/repo")
        .with_commit_sha(Some("abc123".to_owned()))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn posts_json_body_with_content_type(payload: NotificationPayload) {
    let captured = Captured::default();
    let router = Router::new()
        .route("/notify", post(accept))
        .with_state(captured.clone());
    let addr = serve(router).await;
    let transport = ReqwestCallbackTransport::new().expect("client should build");

    transport
        .post_json(&format!("http://{addr}/notify"), &payload)
        .await
        .expect("delivery should succeed");

    let requests = captured.requests.lock().expect("lock").clone();
    assert_eq!(requests.len(), 1);
    let (content_type, body) = requests.first().expect("one request").clone();
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(
        body,
        serde_json::json!({
            "email": "a@x.com",
            "task": "t1",
            "round": 2,
            "nonce": "n1",
            "repo_url": "https://example/repo",
            "commit_sha": "abc123",
            "pages_url": null,
        })
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_success_status_is_a_failed_attempt(payload: NotificationPayload) {
    let addr = serve(Router::new().route("/notify", post(reject))).await;
    let transport = ReqwestCallbackTransport::new().expect("client should build");

    let result = transport
        .post_json(&format!("http://{addr}/notify"), &payload)
        .await;

    assert_eq!(result, Err(DeliveryError::Status { status: 503 }));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn slow_endpoint_times_out(payload: NotificationPayload) {
    let addr = serve(Router::new().route("/notify", post(stall))).await;
    let transport = ReqwestCallbackTransport::with_timeout(Duration::from_millis(100))
        .expect("client should build");

    let result = transport
        .post_json(&format!("http://{addr}/notify"), &payload)
        .await;

    assert_eq!(result, Err(DeliveryError::Timeout));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreachable_endpoint_is_a_transport_error(payload: NotificationPayload) {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("listener should bind");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);
    let transport = ReqwestCallbackTransport::new().expect("client should build");

    let result = transport
        .post_json(&format!("http://{addr}/notify"), &payload)
        .await;

    assert!(matches!(result, Err(DeliveryError::Transport(_))));
}
