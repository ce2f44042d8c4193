use crate::handle_command;
use fleetwire::payload::{MetricsPayload, PayloadMap};
use fleetwire::utils::now_millis;
use fleetwire_http_client::{AgentTransport, TransportPath};
use std::time::Instant;

/// What an agent carries from one cycle to the next.
#[derive(Debug)]
pub struct AgentState {
    pub agent_id: String,
    pub started: Instant,
    pub cycles: u64,
    pub commands_handled: u64,
    /// Last configuration received from the server.
    pub config: PayloadMap,
}

impl AgentState {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            started: Instant::now(),
            cycles: 0,
            commands_handled: 0,
            config: PayloadMap::new(),
        }
    }

    fn sample_metrics(&self) -> MetricsPayload {
        MetricsPayload::new(self.agent_id.clone(), now_millis(), "online")
            .with_metric("uptime_secs", self.started.elapsed().as_secs() as f64)
            .with_metric("cycles", self.cycles as f64)
            .with_metric("commands_handled", self.commands_handled as f64)
    }
}

/// Outcome of one report cycle.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CycleReport {
    pub metrics_path: Option<TransportPath>,
    pub commands_run: usize,
    pub results_reported: usize,
    pub config_updated: bool,
    pub failures: usize,
}

/// Sends metrics, runs pending commands, and refreshes the configuration.
///
/// A failed step is logged and counted; the remaining steps still run.
pub async fn run_cycle<T>(transport: &T, state: &mut AgentState) -> CycleReport
where
    T: AgentTransport + ?Sized,
{
    let mut report = CycleReport::default();
    state.cycles += 1;

    match transport.send_metrics(&state.sample_metrics()).await {
        Ok(delivered) => report.metrics_path = Some(delivered.path),
        Err(err) => {
            tracing::error!(agent_id = %state.agent_id, error = %err, "failed to send metrics");
            report.failures += 1;
        }
    }

    match transport.fetch_commands(&state.agent_id).await {
        Ok(delivered) => {
            for command in delivered.value {
                let result = handle_command(&command);
                report.commands_run += 1;
                state.commands_handled += 1;

                match transport.report_command_result(&result).await {
                    Ok(_) => report.results_reported += 1,
                    Err(err) => {
                        tracing::error!(
                            command_id = %result.command_id,
                            error = %err,
                            "failed to report command result"
                        );
                        report.failures += 1;
                    }
                }
            }
        }
        Err(err) => {
            tracing::error!(agent_id = %state.agent_id, error = %err, "failed to fetch commands");
            report.failures += 1;
        }
    }

    match transport.fetch_config(&state.agent_id).await {
        Ok(delivered) => {
            if delivered.value != state.config {
                tracing::info!(agent_id = %state.agent_id, "configuration updated");
                state.config = delivered.value;
                report.config_updated = true;
            }
        }
        Err(err) => {
            tracing::error!(agent_id = %state.agent_id, error = %err, "failed to fetch config");
            report.failures += 1;
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetwire::payload::{CommandPayload, CommandResultPayload, DiscoveryPayload};
    use fleetwire_http_client::{Delivered, TransportError};
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockTransport {
        fail_metrics: bool,
        commands: Vec<CommandPayload>,
        config: PayloadMap,
        results: Mutex<Vec<CommandResultPayload>>,
    }

    fn binary<T>(value: T) -> Result<Delivered<T>, TransportError> {
        Ok(Delivered {
            value,
            path: TransportPath::Binary,
        })
    }

    #[async_trait::async_trait]
    impl AgentTransport for MockTransport {
        async fn send_metrics(
            &self,
            _metrics: &MetricsPayload,
        ) -> Result<Delivered<()>, TransportError> {
            if self.fail_metrics {
                Err(TransportError::Status(503))
            } else {
                binary(())
            }
        }

        async fn fetch_commands(
            &self,
            _agent_id: &str,
        ) -> Result<Delivered<Vec<CommandPayload>>, TransportError> {
            binary(self.commands.clone())
        }

        async fn report_command_result(
            &self,
            result: &CommandResultPayload,
        ) -> Result<Delivered<()>, TransportError> {
            self.results.lock().unwrap().push(result.clone());
            binary(())
        }

        async fn fetch_config(
            &self,
            _agent_id: &str,
        ) -> Result<Delivered<PayloadMap>, TransportError> {
            binary(self.config.clone())
        }

        async fn report_discovery(
            &self,
            _report: &DiscoveryPayload,
        ) -> Result<Delivered<()>, TransportError> {
            binary(())
        }

        async fn health_check(&self, _agent_id: &str) -> Result<Delivered<()>, TransportError> {
            binary(())
        }
    }

    #[tokio::test]
    async fn runs_commands_and_picks_up_config() {
        let transport = MockTransport {
            commands: vec![
                CommandPayload::new("CMD-1", "ping"),
                CommandPayload::new("CMD-2", "reboot"),
            ],
            config: json!({ "interval": 15 }).as_object().cloned().unwrap(),
            ..Default::default()
        };
        let mut state = AgentState::new("AGENT-001");

        let report = run_cycle(&transport, &mut state).await;

        assert_eq!(report.metrics_path, Some(TransportPath::Binary));
        assert_eq!(report.commands_run, 2);
        assert_eq!(report.results_reported, 2);
        assert!(report.config_updated);
        assert_eq!(report.failures, 0);
        assert_eq!(state.config["interval"], json!(15));

        let results = transport.results.lock().unwrap();
        assert_eq!(results[0].status, "completed");
        assert_eq!(results[1].status, "failed");
    }

    #[tokio::test]
    async fn failed_metrics_do_not_stop_the_cycle() {
        let transport = MockTransport {
            fail_metrics: true,
            commands: vec![CommandPayload::new("CMD-1", "ping")],
            ..Default::default()
        };
        let mut state = AgentState::new("AGENT-001");

        let report = run_cycle(&transport, &mut state).await;

        assert_eq!(report.metrics_path, None);
        assert_eq!(report.failures, 1);
        assert_eq!(report.results_reported, 1);
        assert!(!report.config_updated);

        let second = run_cycle(&transport, &mut state).await;
        assert_eq!(second.failures, 1);
        assert_eq!(state.cycles, 2);
        assert_eq!(state.commands_handled, 2);
    }
}
