use crate::{AgentBackend, BackendError};
use fleetwire::payload::{
    CommandPayload, CommandResultPayload, DiscoveryPayload, MetricsPayload, PayloadMap,
};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// A process-local [`AgentBackend`] that keeps everything in memory.
///
/// Queued commands are handed out once: `pending_commands` drains the
/// agent's queue. Agents without a stored config receive an empty one.
///
/// Recorded metrics, results and discoveries are kept for the lifetime of
/// the backend and never pruned, so it is meant for tests and demos only.
#[derive(Default)]
pub struct InMemoryBackend {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    metrics: Vec<MetricsPayload>,
    queued: HashMap<String, Vec<CommandPayload>>,
    results: Vec<CommandResultPayload>,
    configs: HashMap<String, PayloadMap>,
    discoveries: Vec<DiscoveryPayload>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic in another handler must not take the whole store down with it.
    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn queue_command(&self, agent_id: &str, command: CommandPayload) {
        self.state()
            .queued
            .entry(agent_id.to_string())
            .or_default()
            .push(command);
    }

    pub fn set_config(&self, agent_id: &str, config: PayloadMap) {
        self.state().configs.insert(agent_id.to_string(), config);
    }

    pub fn recorded_metrics(&self) -> Vec<MetricsPayload> {
        self.state().metrics.clone()
    }

    pub fn recorded_results(&self) -> Vec<CommandResultPayload> {
        self.state().results.clone()
    }

    pub fn recorded_discoveries(&self) -> Vec<DiscoveryPayload> {
        self.state().discoveries.clone()
    }
}

#[async_trait::async_trait]
impl AgentBackend for InMemoryBackend {
    async fn record_metrics(&self, metrics: MetricsPayload) -> Result<(), BackendError> {
        self.state().metrics.push(metrics);
        Ok(())
    }

    async fn pending_commands(&self, agent_id: &str) -> Result<Vec<CommandPayload>, BackendError> {
        Ok(self.state().queued.remove(agent_id).unwrap_or_default())
    }

    async fn record_command_result(
        &self,
        result: CommandResultPayload,
    ) -> Result<(), BackendError> {
        self.state().results.push(result);
        Ok(())
    }

    async fn agent_config(&self, agent_id: &str) -> Result<PayloadMap, BackendError> {
        Ok(self
            .state()
            .configs
            .get(agent_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn record_discovery(&self, report: DiscoveryPayload) -> Result<(), BackendError> {
        self.state().discoveries.push(report);
        Ok(())
    }
}
