use fleetwire::frame::{FrameCodec, FrameFlags, MessageKind};
use fleetwire::payload::{
    AckPayload, CommandBatch, CommandPayload, CommandResultPayload, ConfigRequestPayload,
    ConfigResponsePayload, DiscoveredDevice, DiscoveryPayload, HealthCheckPayload,
    MetricsPayload, Payload, PayloadMap, PayloadSchema,
};
use serde_json::json;

fn object(value: serde_json::Value) -> PayloadMap {
    value.as_object().cloned().expect("object literal")
}

fn one_of_each_kind() -> Vec<Payload> {
    let mut ping = CommandPayload::new("CMD-123456", "ping");
    ping.params = object(json!({ "host": "8.8.8.8", "count": 3 }));
    ping.timestamp_ms = 1_709_000_000_000;
    ping.signature = Some("c2lnbmF0dXJl".into());

    let mut device = DiscoveredDevice::new("192.168.0.14");
    device.extra = object(json!({ "hostname": "printer", "ports": [80, 631] }));

    vec![
        MetricsPayload::new("AGENT-001", 1_709_000_000_000, "online")
            .with_metric("cpu", 45.5)
            .with_metric("ram", 62.3)
            .into(),
        CommandBatch {
            cmds: vec![ping, CommandPayload::new("CMD-123457", "collect_logs")],
        }
        .into(),
        CommandResultPayload {
            command_id: "CMD-123456".into(),
            result: object(json!({ "output": "Pong: 12ms", "exitCode": 0 })),
            status: "completed".into(),
            timestamp_ms: 1_709_000_000_900,
        }
        .into(),
        ConfigRequestPayload {
            agent_id: "AGENT-001".into(),
        }
        .into(),
        ConfigResponsePayload {
            config: object(json!({ "interval": 60, "collectors": ["cpu", "ram"], "debug": false })),
        }
        .into(),
        DiscoveryPayload {
            agent_id: "AGENT-001".into(),
            timestamp_ms: 1_709_000_001_000,
            devices: vec![device, DiscoveredDevice::new("192.168.0.15")],
        }
        .into(),
        HealthCheckPayload {
            agent_id: "AGENT-001".into(),
            timestamp_ms: 1_709_000_002_000,
            status: Some("ok".into()),
        }
        .into(),
        AckPayload::rejected("unknown agent").into(),
    ]
}

#[test]
fn every_kind_round_trips_through_the_codec() {
    let payloads = one_of_each_kind();
    assert_eq!(payloads.len(), MessageKind::ALL.len());

    for payload in payloads {
        let frame = payload.to_frame(FrameFlags::NONE).expect("build failed");
        let bytes = FrameCodec::encode(&frame).expect("encode failed");
        let decoded = FrameCodec::decode(&bytes).expect("decode failed");

        assert_eq!(decoded.kind, payload.kind());
        assert_eq!(Payload::from_frame(&decoded).expect("parse failed"), payload);
    }
}

#[test]
fn optional_fields_default_when_absent() {
    let ack = Payload::parse(MessageKind::Ack, &PayloadMap::new()).unwrap();
    assert_eq!(ack, Payload::Ack(AckPayload::ok()));

    let health =
        Payload::parse(MessageKind::HealthCheck, &object(json!({ "a": "AGENT-9" }))).unwrap();
    assert_eq!(
        health,
        Payload::HealthCheck(HealthCheckPayload {
            agent_id: "AGENT-9".into(),
            timestamp_ms: 0,
            status: None,
        })
    );

    let config = Payload::parse(MessageKind::ConfigResponse, &PayloadMap::new()).unwrap();
    assert_eq!(config, Payload::ConfigResponse(ConfigResponsePayload::default()));
}

#[test]
fn payload_maps_use_short_keys() {
    let map = MetricsPayload::new("AGENT-001", 1, "online")
        .with_metric("cpu", 1.5)
        .build()
        .unwrap();

    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["a", "m", "s", "t"]);
}

#[test]
fn missing_required_field_is_an_error_not_a_default() {
    let err = Payload::parse(MessageKind::CommandResult, &object(json!({ "id": "CMD-1" })));
    assert!(err.is_err());
}

fn json_equivalent(payload: &MetricsPayload) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "agentId": payload.agent_id,
        "timestamp": payload.timestamp_ms,
        "metrics": payload.metrics,
        "status": payload.status,
    }))
    .unwrap()
}

fn binary_len(payload: &MetricsPayload) -> usize {
    let frame = Payload::from(payload.clone()).to_frame(FrameFlags::NONE).unwrap();
    FrameCodec::encode(&frame).unwrap().len()
}

#[test]
fn binary_frame_is_smaller_than_json_for_small_reports() {
    let payload = MetricsPayload::new("AGENT-001", 1_709_000_000_000, "online")
        .with_metric("cpu", 45.5)
        .with_metric("ram", 62.3)
        .with_metric("disk", 78.1)
        .with_metric("net", 12.7);

    let binary = binary_len(&payload);
    let json = json_equivalent(&payload).len();
    assert!(binary < json, "binary {binary} >= json {json}");
}

#[test]
fn binary_frame_is_smaller_than_json_for_larger_reports() {
    let payload = MetricsPayload::new("AGENT-001", 1_709_000_000_000, "online")
        .with_metric("cpu", 45.5)
        .with_metric("ram", 62.3)
        .with_metric("disk", 78.1)
        .with_metric("swap", 12.4)
        .with_metric("load1", 1.25)
        .with_metric("load5", 0.98)
        .with_metric("load15", 0.75)
        .with_metric("net_rx", 1024.0)
        .with_metric("net_tx", 2048.0)
        .with_metric("procs", 212.0)
        .with_metric("uptime", 86400.0)
        .with_metric("temp", 54.2);

    let binary = binary_len(&payload);
    let json = json_equivalent(&payload).len();
    assert!(binary < json, "binary {binary} >= json {json}");
}
