use crate::{AgentBackend, ServerError};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bytes::Bytes;
use fleetwire::{
    constants::BINARY_CONTENT_TYPE,
    frame::{Frame, FrameCodec},
    json_api::{
        CommandList, CommandRecord, CommandResultReport, ConfigEnvelope, DiscoveryReport,
        MetricsReport, StatusReply,
    },
    payload::{
        AckPayload, CommandBatch, CommandResultPayload, ConfigRequestPayload,
        ConfigResponsePayload, DiscoveryPayload, HealthCheckPayload, MetricsPayload,
        PayloadSchema,
    },
};
use std::sync::Arc;

type SharedBackend = Arc<dyn AgentBackend>;

/// Every binary and JSON endpoint an agent talks to.
pub fn router(backend: Arc<dyn AgentBackend>) -> Router {
    Router::new()
        // Binary frame protocol
        .route("/metrics/bin", post(post_metrics_bin))
        .route("/commands/bin/{id}", get(get_commands_bin))
        .route("/commands/bin/{id}/result", post(post_command_result_bin))
        .route("/config/bin", post(post_config_request_bin))
        .route("/config/bin/{id}", get(get_config_bin))
        .route("/discovery/bin", post(post_discovery_bin))
        .route("/health/bin", post(post_health_bin))
        // JSON fallback protocol
        .route("/metrics", post(post_metrics_json))
        .route("/commands/{id}", get(get_commands_json))
        .route("/commands/{id}/result", post(post_command_result_json))
        .route("/config/{id}", get(get_config_json))
        .route("/discovery", post(post_discovery_json))
        .route("/health", get(get_health_json))
        .with_state(backend)
}

fn frame_response<P: PayloadSchema>(payload: &P) -> Result<Response, ServerError> {
    let bytes = FrameCodec::encode(&payload.to_frame()?)?;
    Ok(([(CONTENT_TYPE, BINARY_CONTENT_TYPE)], bytes).into_response())
}

fn decode_request<P: PayloadSchema>(body: &Bytes) -> Result<P, ServerError> {
    let frame: Frame = FrameCodec::decode(body)?;
    Ok(P::from_frame(&frame)?)
}

async fn post_metrics_bin(
    State(backend): State<SharedBackend>,
    body: Bytes,
) -> Result<Response, ServerError> {
    let metrics: MetricsPayload = decode_request(&body)?;
    tracing::debug!(agent_id = %metrics.agent_id, count = metrics.metrics.len(), "binary metrics");
    backend.record_metrics(metrics).await?;
    frame_response(&AckPayload::ok())
}

async fn get_commands_bin(
    State(backend): State<SharedBackend>,
    Path(agent_id): Path<String>,
) -> Result<Response, ServerError> {
    let cmds = backend.pending_commands(&agent_id).await?;
    frame_response(&CommandBatch { cmds })
}

async fn post_command_result_bin(
    State(backend): State<SharedBackend>,
    Path(command_id): Path<String>,
    body: Bytes,
) -> Result<Response, ServerError> {
    let result: CommandResultPayload = decode_request(&body)?;
    if result.command_id != command_id {
        return frame_response(&AckPayload::rejected(format!(
            "result for {} posted to {}",
            result.command_id, command_id
        )));
    }
    backend.record_command_result(result).await?;
    frame_response(&AckPayload::ok())
}

async fn post_config_request_bin(
    State(backend): State<SharedBackend>,
    body: Bytes,
) -> Result<Response, ServerError> {
    let request: ConfigRequestPayload = decode_request(&body)?;
    let config = backend.agent_config(&request.agent_id).await?;
    frame_response(&ConfigResponsePayload { config })
}

async fn get_config_bin(
    State(backend): State<SharedBackend>,
    Path(agent_id): Path<String>,
) -> Result<Response, ServerError> {
    let config = backend.agent_config(&agent_id).await?;
    frame_response(&ConfigResponsePayload { config })
}

async fn post_discovery_bin(
    State(backend): State<SharedBackend>,
    body: Bytes,
) -> Result<Response, ServerError> {
    let report: DiscoveryPayload = decode_request(&body)?;
    backend.record_discovery(report).await?;
    frame_response(&AckPayload::ok())
}

async fn post_health_bin(body: Bytes) -> Result<Response, ServerError> {
    let probe: HealthCheckPayload = decode_request(&body)?;
    tracing::trace!(agent_id = %probe.agent_id, "health probe");
    frame_response(&AckPayload::ok())
}

async fn post_metrics_json(
    State(backend): State<SharedBackend>,
    Json(report): Json<MetricsReport>,
) -> Result<Json<StatusReply>, ServerError> {
    tracing::debug!(agent_id = %report.agent_id, "JSON metrics");
    backend.record_metrics(report.into()).await?;
    Ok(Json(StatusReply::ok()))
}

async fn get_commands_json(
    State(backend): State<SharedBackend>,
    Path(agent_id): Path<String>,
) -> Result<Json<CommandList>, ServerError> {
    let commands = backend
        .pending_commands(&agent_id)
        .await?
        .into_iter()
        .map(CommandRecord::from)
        .collect();
    Ok(Json(CommandList { commands }))
}

async fn post_command_result_json(
    State(backend): State<SharedBackend>,
    Path(command_id): Path<String>,
    Json(mut report): Json<CommandResultReport>,
) -> Result<Json<StatusReply>, ServerError> {
    if report.command_id.is_empty() {
        report.command_id = command_id;
    } else if report.command_id != command_id {
        return Ok(Json(StatusReply {
            ok: false,
            message: Some(format!(
                "result for {} posted to {}",
                report.command_id, command_id
            )),
        }));
    }
    backend.record_command_result(report.into()).await?;
    Ok(Json(StatusReply::ok()))
}

async fn get_config_json(
    State(backend): State<SharedBackend>,
    Path(agent_id): Path<String>,
) -> Result<Json<ConfigEnvelope>, ServerError> {
    let config = backend.agent_config(&agent_id).await?;
    Ok(Json(ConfigEnvelope { config }))
}

async fn post_discovery_json(
    State(backend): State<SharedBackend>,
    Json(report): Json<DiscoveryReport>,
) -> Result<Json<StatusReply>, ServerError> {
    backend.record_discovery(report.into()).await?;
    Ok(Json(StatusReply::ok()))
}

async fn get_health_json() -> Json<StatusReply> {
    Json(StatusReply::ok())
}
