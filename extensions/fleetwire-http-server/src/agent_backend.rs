use fleetwire::payload::{
    CommandPayload, CommandResultPayload, DiscoveryPayload, MetricsPayload, PayloadMap,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("unknown agent {0}")]
    UnknownAgent(String),

    #[error("unknown command {0}")]
    UnknownCommand(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

/// Persistence and business logic behind the protocol endpoints.
///
/// The HTTP layer only decodes requests and encodes replies; everything that
/// touches state goes through this trait. Both the binary and the JSON
/// routes call the same methods, so a backend never sees which protocol a
/// request arrived on.
#[async_trait::async_trait]
pub trait AgentBackend: Send + Sync + 'static {
    async fn record_metrics(&self, metrics: MetricsPayload) -> Result<(), BackendError>;

    /// Returns the commands waiting for `agent_id`. Whether they are then
    /// considered delivered is up to the backend.
    async fn pending_commands(&self, agent_id: &str) -> Result<Vec<CommandPayload>, BackendError>;

    async fn record_command_result(&self, result: CommandResultPayload)
    -> Result<(), BackendError>;

    async fn agent_config(&self, agent_id: &str) -> Result<PayloadMap, BackendError>;

    async fn record_discovery(&self, report: DiscoveryPayload) -> Result<(), BackendError>;
}
