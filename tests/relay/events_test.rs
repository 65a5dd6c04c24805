use crate::support::*;
use async_trait::async_trait;
use futures_util::StreamExt;
use serde_json::json;
use std::sync::Arc;
use thinkrelay::error::RelayError;
use thinkrelay::events::{ChannelEmitter, EventEmitter};
use thinkrelay::types::StatusEvent;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn emitter_sees_progress_then_done() {
    let server = MockServer::start().await;
    mount_sse(&server, sse_body(&["hi"])).await;
    let (emitter, mut rx) = ChannelEmitter::new();

    let out: Vec<String> = relay_for(&server)
        .pipe(json!({}), Some(Arc::new(emitter)))
        .collect()
        .await;
    assert_eq!(out, vec!["<think>\n", "hi"]);

    let first = rx.recv().await.unwrap();
    assert!(!first.done);
    assert!(first.description.contains(MODEL));
    assert_eq!(rx.recv().await.unwrap(), StatusEvent::finished("Done"));
}

#[tokio::test]
async fn emitter_sees_failure_kind() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;
    let (emitter, mut rx) = ChannelEmitter::new();

    let out: Vec<String> = relay_for(&server)
        .pipe(json!({}), Some(Arc::new(emitter)))
        .collect()
        .await;
    assert_eq!(out.len(), 1);

    let _progress = rx.recv().await.unwrap();
    assert_eq!(
        rx.recv().await.unwrap(),
        StatusEvent::finished("Failed: UpstreamStatusError")
    );
}

struct BrokenEmitter;

#[async_trait]
impl EventEmitter for BrokenEmitter {
    async fn emit(&self, _event: StatusEvent) -> Result<(), RelayError> {
        Err(RelayError::Stream("host went away".into()))
    }
}

#[tokio::test]
async fn failing_emitter_does_not_touch_output() {
    let server = MockServer::start().await;
    mount_sse(&server, sse_body(&["a", "b"])).await;

    let out: Vec<String> = relay_for(&server)
        .pipe(json!({}), Some(Arc::new(BrokenEmitter)))
        .collect()
        .await;
    assert_eq!(out, vec!["<think>\n", "a", "b"]);
}
