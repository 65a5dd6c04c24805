use crate::support::*;
use futures_util::StreamExt;
use serde_json::json;
use std::time::Duration;
use thinkrelay::error::RelayError;
use thinkrelay::types::{HttpConfig, RequestEnvelope};
use thinkrelay::{RelayConfig, StreamRelay};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn body() -> serde_json::Value {
    json!({"messages": [{"role": "user", "content": "hi"}]})
}

#[tokio::test]
async fn status_500_yields_single_error_chunk() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
        .expect(1)
        .mount(&server)
        .await;

    let out: Vec<String> = relay_for(&server).pipe(body(), None).collect().await;
    assert_eq!(out.len(), 1);
    let msg = error_message(&out[0]);
    assert!(msg.contains("500"));
    assert!(msg.contains("server error"));
    assert_eq!(msg, "Upstream returned 500: server error");
}

#[tokio::test]
async fn error_body_is_truncated_to_200_characters() {
    let server = MockServer::start().await;
    let long = format!("{{\"object\":\"error\",\"message\":\"{}\"}}", "é".repeat(400));
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(404).set_body_string(long.clone()))
        .mount(&server)
        .await;

    let envelope = RequestEnvelope::from_value(body()).unwrap();
    let items: Vec<_> = relay_for(&server).stream(&envelope).collect().await;
    assert_eq!(items.len(), 1);
    match &items[0] {
        Err(RelayError::UpstreamStatus { status, body }) => {
            assert_eq!(*status, 404);
            assert_eq!(body.chars().count(), 200);
            assert!(long.starts_with(body.as_str()));
        }
        other => panic!("expected upstream status error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_200_success_codes_are_still_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(202).set_body_string(sse_body(&["x"])))
        .mount(&server)
        .await;

    let out: Vec<String> = relay_for(&server).pipe(body(), None).collect().await;
    assert_eq!(out.len(), 1);
    assert!(error_message(&out[0]).starts_with("Upstream returned 202"));
}

#[tokio::test]
async fn malformed_frame_ends_call_with_decode_error() {
    let server = MockServer::start().await;
    let sse = format!(
        "{}\n\ndata: {{\"choices\": [\n\n{}\n\ndata: [DONE]\n\n",
        delta_line("partial"),
        delta_line("never seen")
    );
    mount_sse(&server, sse).await;

    let out: Vec<String> = relay_for(&server).pipe(body(), None).collect().await;
    assert_eq!(out.len(), 3);
    assert_eq!(out[0], "<think>\n");
    assert_eq!(out[1], "partial");
    assert!(error_message(&out[2]).starts_with("DecodeError: "));
}

#[tokio::test]
async fn wrongly_typed_content_is_a_decode_error() {
    let server = MockServer::start().await;
    mount_sse(
        &server,
        "data: {\"choices\":[{\"delta\":{\"content\":42}}]}\n\ndata: [DONE]\n\n",
    )
    .await;

    let out: Vec<String> = relay_for(&server).pipe(body(), None).collect().await;
    assert_eq!(out.len(), 1);
    assert!(error_message(&out[0]).starts_with("DecodeError"));
}

#[tokio::test]
async fn connection_refused_is_a_transport_error_chunk() {
    // nothing listens on port 1
    let relay = StreamRelay::new(RelayConfig::new("http://127.0.0.1:1/v1", MODEL)).unwrap();

    let out: Vec<String> = relay.pipe(body(), None).collect().await;
    assert_eq!(out.len(), 1);
    assert!(error_message(&out[0]).starts_with("TransportError: "));
}

#[tokio::test]
async fn overall_timeout_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(sse_response(sse_body(&["late"])).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let http = HttpConfig::builder()
        .timeout(Some(Duration::from_millis(200)))
        .build();
    let relay = StreamRelay::new(config_for(&server).with_http_config(http)).unwrap();

    let out: Vec<String> = relay.pipe(body(), None).collect().await;
    assert_eq!(out.len(), 1);
    assert!(error_message(&out[0]).starts_with("TransportError"));
}

#[tokio::test]
async fn error_in_one_call_does_not_affect_the_next() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("loading model"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_sse(&server, sse_body(&["ok"])).await;

    let relay = relay_for(&server);
    let first: Vec<String> = relay.pipe(body(), None).collect().await;
    assert!(error_message(&first[0]).contains("503"));

    let second: Vec<String> = relay.pipe(body(), None).collect().await;
    assert_eq!(second, vec!["<think>\n", "ok"]);
}

#[test]
fn relay_rejects_missing_model() {
    let err = StreamRelay::new(RelayConfig::new("http://localhost:8000/v1", "")).unwrap_err();
    assert!(matches!(err, RelayError::Configuration(_)));
}
