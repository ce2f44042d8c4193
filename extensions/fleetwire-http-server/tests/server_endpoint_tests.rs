use fleetwire::constants::BINARY_CONTENT_TYPE;
use fleetwire::frame::{FrameCodec, MessageKind};
use fleetwire::payload::{
    AckPayload, CommandBatch, CommandPayload, CommandResultPayload, ConfigRequestPayload,
    ConfigResponsePayload, MetricsPayload, PayloadSchema,
};
use fleetwire_http_server::{FleetServer, InMemoryBackend, utils::bind_local_listener};
use serde_json::json;
use std::sync::Arc;

async fn start_server() -> (Arc<InMemoryBackend>, String) {
    let backend = Arc::new(InMemoryBackend::new());
    let (listener, base_url) = bind_local_listener().await.unwrap();

    let server = FleetServer::new(backend.clone());
    tokio::spawn(async move {
        let _ = server.serve_with_listener(listener).await;
    });

    (backend, base_url)
}

async fn post_frame(base_url: &str, path: &str, body: Vec<u8>) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{base_url}{path}"))
        .header("content-type", BINARY_CONTENT_TYPE)
        .body(body)
        .send()
        .await
        .expect("request failed")
}

#[tokio::test]
async fn binary_metrics_are_recorded_and_acked() {
    let (backend, base_url) = start_server().await;

    let payload = MetricsPayload::new("AGENT-001", 1_709_000_000_000, "online")
        .with_metric("cpu", 45.5);
    let body = FrameCodec::encode(&payload.to_frame().unwrap()).unwrap();

    let response = post_frame(&base_url, "/metrics/bin", body).await;
    assert!(response.status().is_success());
    assert_eq!(response.headers()["content-type"], BINARY_CONTENT_TYPE);

    let reply = FrameCodec::decode(&response.bytes().await.unwrap()).unwrap();
    assert_eq!(reply.kind, MessageKind::Ack);
    assert!(AckPayload::from_frame(&reply).unwrap().ok);

    assert_eq!(backend.recorded_metrics(), vec![payload]);
}

#[tokio::test]
async fn corrupt_frames_get_a_client_error() {
    let (backend, base_url) = start_server().await;

    let payload = MetricsPayload::new("AGENT-001", 1, "online");
    let mut body = FrameCodec::encode(&payload.to_frame().unwrap()).unwrap();
    let last = body.len() - 1;
    body[last] ^= 0xFF;

    let response = post_frame(&base_url, "/metrics/bin", body).await;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    assert!(backend.recorded_metrics().is_empty());
}

#[tokio::test]
async fn frame_of_the_wrong_kind_is_refused() {
    let (_backend, base_url) = start_server().await;

    let wrong = ConfigRequestPayload {
        agent_id: "AGENT-001".into(),
    };
    let body = FrameCodec::encode(&wrong.to_frame().unwrap()).unwrap();

    let response = post_frame(&base_url, "/metrics/bin", body).await;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn queued_commands_are_served_once() {
    let (backend, base_url) = start_server().await;
    backend.queue_command("AGENT-001", CommandPayload::new("CMD-1", "ping"));

    let first = reqwest::get(format!("{base_url}/commands/bin/AGENT-001"))
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    let batch = CommandBatch::from_frame(&FrameCodec::decode(&first).unwrap()).unwrap();
    assert_eq!(batch.cmds.len(), 1);
    assert_eq!(batch.cmds[0].action, "ping");

    let second: serde_json::Value = reqwest::get(format!("{base_url}/commands/AGENT-001"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(second, json!({ "commands": [] }));
}

#[tokio::test]
async fn command_result_for_another_command_is_rejected_in_the_ack() {
    let (backend, base_url) = start_server().await;

    let result = CommandResultPayload {
        command_id: "CMD-2".into(),
        result: Default::default(),
        status: "completed".into(),
        timestamp_ms: 0,
    };
    let body = FrameCodec::encode(&result.to_frame().unwrap()).unwrap();

    let response = post_frame(&base_url, "/commands/bin/CMD-1/result", body).await;
    let ack = AckPayload::from_frame(&FrameCodec::decode(&response.bytes().await.unwrap()).unwrap())
        .unwrap();

    assert!(!ack.ok);
    assert!(backend.recorded_results().is_empty());
}

#[tokio::test]
async fn config_is_available_by_get_and_by_request_frame() {
    let (backend, base_url) = start_server().await;
    let config = json!({ "interval": 30 }).as_object().cloned().unwrap();
    backend.set_config("AGENT-001", config.clone());

    let by_get = reqwest::get(format!("{base_url}/config/bin/AGENT-001"))
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    let by_get = ConfigResponsePayload::from_frame(&FrameCodec::decode(&by_get).unwrap()).unwrap();
    assert_eq!(by_get.config, config);

    let request = ConfigRequestPayload {
        agent_id: "AGENT-001".into(),
    };
    let body = FrameCodec::encode(&request.to_frame().unwrap()).unwrap();
    let by_post = post_frame(&base_url, "/config/bin", body).await.bytes().await.unwrap();
    let by_post =
        ConfigResponsePayload::from_frame(&FrameCodec::decode(&by_post).unwrap()).unwrap();
    assert_eq!(by_post.config, config);
}

#[tokio::test]
async fn json_metrics_reach_the_same_backend() {
    let (backend, base_url) = start_server().await;

    let response = reqwest::Client::new()
        .post(format!("{base_url}/metrics"))
        .json(&json!({
            "agentId": "AGENT-002",
            "timestamp": 1_709_000_000_000u64,
            "metrics": { "cpu": 10.0 },
            "status": "online"
        }))
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    let recorded = backend.recorded_metrics();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].agent_id, "AGENT-002");
    assert_eq!(recorded[0].metrics["cpu"], 10.0);
}
