use crate::{AgentTransport, Delivered, TransportConfig, TransportError, TransportPath};
use fleetwire::{
    constants::BINARY_CONTENT_TYPE,
    frame::{Frame, FrameCodec},
    json_api::{
        CommandList, CommandResultReport, ConfigEnvelope, DiscoveryReport, MetricsReport,
        StatusReply,
    },
    payload::{
        AckPayload, CommandBatch, CommandPayload, CommandResultPayload, ConfigResponsePayload,
        DiscoveryPayload, HealthCheckPayload, MetricsPayload, PayloadMap, PayloadSchema,
    },
    utils::now_millis,
};
use reqwest::{
    RequestBuilder, Url,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde::{Serialize, de::DeserializeOwned};
use std::future::Future;

/// Agent-side HTTP client that speaks the binary frame protocol first and
/// falls back to plain JSON.
///
/// Every call tries binary (unless disabled in the config) and, on any
/// failure of that attempt, repeats the same logical request over JSON.
/// Nothing about an earlier failure is remembered: the next call tries binary
/// again. Each request carries the configured timeout, so one call takes at
/// most two timeouts.
///
/// The client is cheap to share; `reqwest::Client` pools connections
/// internally and the remaining fields are immutable.
pub struct TransportClient {
    config: TransportConfig,
    base_url: Url,
    http: reqwest::Client,
}

impl TransportClient {
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| TransportError::Config(format!("base URL {:?}: {e}", config.base_url)))?;

        if base_url.cannot_be_a_base() {
            return Err(TransportError::Config(format!(
                "base URL {:?} cannot carry a path",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| TransportError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            base_url,
            http,
        })
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Runs `binary`, and `json` only if `binary` failed.
    ///
    /// Both arguments are unstarted futures; the JSON request is not built or
    /// sent unless it is needed.
    async fn with_fallback<T, B, J>(
        &self,
        operation: &'static str,
        binary: B,
        json: J,
    ) -> Result<Delivered<T>, TransportError>
    where
        B: Future<Output = Result<T, TransportError>>,
        J: Future<Output = Result<T, TransportError>>,
    {
        let binary_err = if self.config.prefer_binary {
            match binary.await {
                Ok(value) => {
                    tracing::debug!(operation, "delivered over binary");
                    return Ok(Delivered {
                        value,
                        path: TransportPath::Binary,
                    });
                }
                Err(err) => {
                    tracing::warn!(
                        operation,
                        error = %err,
                        "binary path failed, falling back to JSON"
                    );
                    Some(err)
                }
            }
        } else {
            None
        };

        match json.await {
            Ok(value) => {
                tracing::debug!(operation, "delivered over JSON");
                Ok(Delivered {
                    value,
                    path: TransportPath::Json,
                })
            }
            Err(json_err) => {
                tracing::error!(operation, error = %json_err, "JSON path failed");
                Err(match binary_err {
                    Some(binary_err) => TransportError::BothPathsFailed {
                        binary: Box::new(binary_err),
                        json: Box::new(json_err),
                    },
                    None => json_err,
                })
            }
        }
    }

    fn url(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::Config("base URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// Sends one binary request and decodes the frame that comes back.
    async fn binary_exchange(
        &self,
        method: reqwest::Method,
        segments: &[&str],
        body: Option<Frame>,
    ) -> Result<Frame, TransportError> {
        let mut request = self
            .authorize(self.http.request(method, self.url(segments)?))
            .header(ACCEPT, BINARY_CONTENT_TYPE);

        if let Some(frame) = body {
            request = request
                .header(CONTENT_TYPE, BINARY_CONTENT_TYPE)
                .body(FrameCodec::encode(&frame)?);
        }

        let response = request.send().await?.error_for_status()?;
        let bytes = response.bytes().await?;

        Ok(FrameCodec::decode(&bytes)?)
    }

    /// Posts a frame and requires a positive ACK in return.
    async fn binary_post_acked(
        &self,
        segments: &[&str],
        body: Frame,
    ) -> Result<(), TransportError> {
        let reply = self
            .binary_exchange(reqwest::Method::POST, segments, Some(body))
            .await?;
        let ack = AckPayload::from_frame(&reply)?;

        if ack.ok {
            Ok(())
        } else {
            Err(TransportError::Rejected(
                ack.message.unwrap_or_else(|| "no reason given".to_string()),
            ))
        }
    }

    async fn json_get<R: DeserializeOwned>(&self, segments: &[&str]) -> Result<R, TransportError> {
        let response = self
            .authorize(self.http.get(self.url(segments)?))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<R>().await?)
    }

    async fn json_post<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<(), TransportError> {
        let response = self
            .authorize(self.http.post(self.url(segments)?))
            .json(body)
            .send()
            .await?
            .error_for_status()?;

        // Servers may answer with an empty 2xx; only an explicit refusal counts.
        let bytes = response.bytes().await?;
        if let Ok(reply) = serde_json::from_slice::<StatusReply>(&bytes) {
            if !reply.ok {
                return Err(TransportError::Rejected(
                    reply.message.unwrap_or_else(|| "no reason given".to_string()),
                ));
            }
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl AgentTransport for TransportClient {
    async fn send_metrics(
        &self,
        metrics: &MetricsPayload,
    ) -> Result<Delivered<()>, TransportError> {
        self.with_fallback(
            "send_metrics",
            async { self.binary_post_acked(&["metrics", "bin"], metrics.to_frame()?).await },
            async { self.json_post(&["metrics"], &MetricsReport::from(metrics)).await },
        )
        .await
    }

    async fn fetch_commands(
        &self,
        agent_id: &str,
    ) -> Result<Delivered<Vec<CommandPayload>>, TransportError> {
        self.with_fallback(
            "fetch_commands",
            async {
                let frame = self
                    .binary_exchange(reqwest::Method::GET, &["commands", "bin", agent_id], None)
                    .await?;
                Ok::<_, TransportError>(CommandBatch::from_frame(&frame)?.cmds)
            },
            async {
                let list: CommandList = self.json_get(&["commands", agent_id]).await?;
                let commands: Vec<CommandPayload> =
                    list.commands.into_iter().map(CommandPayload::from).collect();
                Ok::<_, TransportError>(commands)
            },
        )
        .await
    }

    async fn report_command_result(
        &self,
        result: &CommandResultPayload,
    ) -> Result<Delivered<()>, TransportError> {
        let command_id = result.command_id.as_str();

        self.with_fallback(
            "report_command_result",
            async {
                let frame = result.to_frame()?;
                self.binary_post_acked(&["commands", "bin", command_id, "result"], frame)
                    .await
            },
            async {
                let report = CommandResultReport::from(result);
                self.json_post(&["commands", command_id, "result"], &report).await
            },
        )
        .await
    }

    async fn fetch_config(&self, agent_id: &str) -> Result<Delivered<PayloadMap>, TransportError> {
        self.with_fallback(
            "fetch_config",
            async {
                let frame = self
                    .binary_exchange(reqwest::Method::GET, &["config", "bin", agent_id], None)
                    .await?;
                Ok::<_, TransportError>(ConfigResponsePayload::from_frame(&frame)?.config)
            },
            async {
                let envelope: ConfigEnvelope = self.json_get(&["config", agent_id]).await?;
                Ok::<_, TransportError>(envelope.config)
            },
        )
        .await
    }

    async fn report_discovery(
        &self,
        report: &DiscoveryPayload,
    ) -> Result<Delivered<()>, TransportError> {
        self.with_fallback(
            "report_discovery",
            async { self.binary_post_acked(&["discovery", "bin"], report.to_frame()?).await },
            async { self.json_post(&["discovery"], &DiscoveryReport::from(report)).await },
        )
        .await
    }

    async fn health_check(&self, agent_id: &str) -> Result<Delivered<()>, TransportError> {
        let probe = HealthCheckPayload {
            agent_id: agent_id.to_string(),
            timestamp_ms: now_millis(),
            status: None,
        };

        self.with_fallback(
            "health_check",
            async { self.binary_post_acked(&["health", "bin"], probe.to_frame()?).await },
            async {
                let reply: StatusReply = self.json_get(&["health"]).await?;
                if reply.ok {
                    Ok(())
                } else {
                    Err(TransportError::Rejected(
                        reply.message.unwrap_or_else(|| "unhealthy".to_string()),
                    ))
                }
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_base_url() {
        let result = TransportClient::new(TransportConfig::new("not a url"));
        assert!(matches!(result, Err(TransportError::Config(_))));
    }

    #[test]
    fn builds_endpoint_urls_with_escaped_segments() {
        let client =
            TransportClient::new(TransportConfig::new("http://fleet.local:3000/api/")).unwrap();

        let url = client.url(&["commands", "bin", "AGENT 1/x"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://fleet.local:3000/api/commands/bin/AGENT%201%2Fx"
        );
    }
}
