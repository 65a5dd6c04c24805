use crate::support::*;
use futures_util::StreamExt;
use serde_json::json;
use thinkrelay::utils::make_cancellable_stream;
use wiremock::MockServer;

#[tokio::test]
async fn dropping_the_stream_early_leaves_the_relay_usable() {
    let server = MockServer::start().await;
    let deltas: Vec<String> = (0..200).map(|i| format!("t{i}")).collect();
    let refs: Vec<&str> = deltas.iter().map(String::as_str).collect();
    mount_sse(&server, sse_body(&refs)).await;
    let relay = relay_for(&server);

    let mut stream = relay.pipe(json!({}), None);
    assert_eq!(stream.next().await.as_deref(), Some("<think>\n"));
    assert_eq!(stream.next().await.as_deref(), Some("t0"));
    drop(stream);

    let out: Vec<String> = relay.pipe(json!({}), None).collect().await;
    assert_eq!(out.len(), 201);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn cancel_handle_ends_the_stream() {
    let server = MockServer::start().await;
    mount_sse(&server, sse_body(&["one", "two", "three"])).await;

    let (mut stream, handle) = make_cancellable_stream(relay_for(&server).pipe(json!({}), None));
    assert_eq!(stream.next().await.as_deref(), Some("<think>\n"));
    assert_eq!(stream.next().await.as_deref(), Some("one"));
    handle.cancel();
    assert_eq!(stream.next().await, None);
}
