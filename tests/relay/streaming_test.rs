use crate::support::*;
use futures_util::StreamExt;
use serde_json::json;
use thinkrelay::types::{OutputChunk, RequestEnvelope};
use wiremock::MockServer;

fn chat_body() -> serde_json::Value {
    json!({
        "model": "whatever-the-ui-had",
        "messages": [{"role": "user", "content": "Why is the sky blue?"}]
    })
}

#[tokio::test]
async fn plain_deltas_are_prefixed_with_think_marker() {
    let server = MockServer::start().await;
    mount_sse(&server, sse_body(&["Hello", " world"])).await;

    let out: Vec<String> = relay_for(&server).pipe(chat_body(), None).collect().await;
    assert_eq!(out, vec!["<think>\n", "Hello", " world"]);
}

#[tokio::test]
async fn existing_think_tag_is_not_duplicated() {
    let server = MockServer::start().await;
    mount_sse(&server, sse_body(&["<think>reasoning</think>answer"])).await;

    let out: Vec<String> = relay_for(&server).pipe(chat_body(), None).collect().await;
    assert_eq!(out, vec!["<think>reasoning</think>answer"]);
}

#[tokio::test]
async fn thinking_tag_after_whitespace_counts_as_present() {
    let server = MockServer::start().await;
    mount_sse(&server, sse_body(&["\n  <thinking>", "step one", "</thinking>done"])).await;

    let out: Vec<String> = relay_for(&server).pipe(chat_body(), None).collect().await;
    assert_eq!(out, vec!["\n  <thinking>", "step one", "</thinking>done"]);
}

#[tokio::test]
async fn done_sentinel_ends_the_stream_even_with_trailing_lines() {
    let server = MockServer::start().await;
    let body = format!(
        "{}\n\ndata: [DONE]\n\n{}\n\ndata: {{oops\n\n",
        delta_line("first"),
        delta_line("after done")
    );
    mount_sse(&server, body).await;

    let out: Vec<String> = relay_for(&server).pipe(chat_body(), None).collect().await;
    assert_eq!(out, vec!["<think>\n", "first"]);
}

#[tokio::test]
async fn keep_alives_and_non_data_lines_produce_nothing() {
    let server = MockServer::start().await;
    let body = format!(
        ": keep-alive\n\nevent: ping\nid: 7\nretry: 1000\n\n{}\n\n: keep-alive\n\n{}\n\ndata: [DONE]\n\n",
        delta_line("<think>"),
        delta_line("x")
    );
    mount_sse(&server, body).await;

    let out: Vec<String> = relay_for(&server).pipe(chat_body(), None).collect().await;
    assert_eq!(out, vec!["<think>", "x"]);
}

#[tokio::test]
async fn marker_is_emitted_once_across_many_chunks() {
    let server = MockServer::start().await;
    let deltas: Vec<String> = (0..50).map(|i| format!("tok{i} ")).collect();
    let refs: Vec<&str> = deltas.iter().map(String::as_str).collect();
    mount_sse(&server, sse_body(&refs)).await;

    let out: Vec<String> = relay_for(&server).pipe(chat_body(), None).collect().await;
    assert_eq!(out.len(), 51);
    assert_eq!(out.iter().filter(|c| c.as_str() == "<think>\n").count(), 1);
    assert_eq!(out[0], "<think>\n");
    assert_eq!(&out[1..], refs.as_slice());
}

#[tokio::test]
async fn vllm_fixture_without_tag_gets_marker() {
    let server = MockServer::start().await;
    mount_sse(&server, read_fixture("vllm_r1_plain.sse")).await;

    let out: Vec<String> = relay_for(&server).pipe(chat_body(), None).collect().await;
    assert_eq!(
        out,
        vec![
            "<think>\n",
            "Okay",
            ", the user asks",
            " about Rayleigh scattering.\n</think>\n\n",
            "Blue light scatters more.",
        ]
    );
}

#[tokio::test]
async fn ollama_fixture_with_crlf_and_tag_passes_through() {
    let server = MockServer::start().await;
    mount_sse(&server, read_fixture("ollama_tagged.sse")).await;

    let out: Vec<String> = relay_for(&server).pipe(chat_body(), None).collect().await;
    assert_eq!(out, vec!["<think>", "\nShort answer.", "</think>\n\n42"]);
}

#[tokio::test]
async fn typed_stream_distinguishes_marker_from_content() {
    let server = MockServer::start().await;
    mount_sse(&server, sse_body(&["", "Hi"])).await;

    let envelope = RequestEnvelope::from_value(chat_body()).unwrap();
    let chunks: Vec<OutputChunk> = relay_for(&server)
        .stream(&envelope)
        .map(|item| item.expect("no error"))
        .collect()
        .await;
    assert_eq!(
        chunks,
        vec![OutputChunk::Marker, OutputChunk::Content("Hi".into())]
    );
}

#[tokio::test]
async fn concurrent_calls_keep_independent_marker_state() {
    let server = MockServer::start().await;
    mount_sse(&server, sse_body(&["a", "b"])).await;
    let relay = relay_for(&server);

    let (first, second) = tokio::join!(
        relay.pipe(chat_body(), None).collect::<Vec<String>>(),
        relay.pipe(chat_body(), None).collect::<Vec<String>>()
    );
    assert_eq!(first, vec!["<think>\n", "a", "b"]);
    assert_eq!(second, first);

    // reuse after completion starts from a clean state too
    let third: Vec<String> = relay.pipe(chat_body(), None).collect().await;
    assert_eq!(third, first);
}

#[tokio::test]
async fn body_without_done_sentinel_ends_cleanly() {
    let server = MockServer::start().await;
    mount_sse(&server, format!("{}\n\n", delta_line("tail"))).await;

    let out: Vec<String> = relay_for(&server).pipe(chat_body(), None).collect().await;
    assert_eq!(out, vec!["<think>\n", "tail"]);
}
