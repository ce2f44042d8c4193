use crate::{Delivered, TransportError};
use fleetwire::payload::{
    CommandPayload, CommandResultPayload, DiscoveryPayload, MetricsPayload, PayloadMap,
};

/// The logical operations an agent performs against its server.
///
/// Each operation is independent of the others; implementors must not let
/// the outcome of one call influence how a later call is attempted.
#[async_trait::async_trait]
pub trait AgentTransport: Send + Sync {
    async fn send_metrics(
        &self,
        metrics: &MetricsPayload,
    ) -> Result<Delivered<()>, TransportError>;

    async fn fetch_commands(
        &self,
        agent_id: &str,
    ) -> Result<Delivered<Vec<CommandPayload>>, TransportError>;

    async fn report_command_result(
        &self,
        result: &CommandResultPayload,
    ) -> Result<Delivered<()>, TransportError>;

    async fn fetch_config(&self, agent_id: &str) -> Result<Delivered<PayloadMap>, TransportError>;

    async fn report_discovery(
        &self,
        report: &DiscoveryPayload,
    ) -> Result<Delivered<()>, TransportError>;

    async fn health_check(&self, agent_id: &str) -> Result<Delivered<()>, TransportError>;
}
