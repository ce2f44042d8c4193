use clap::Parser;
use example_fleetwire_agent::{AgentArgs, AgentState, run_cycle};
use fleetwire_http_client::TransportClient;
use std::process::ExitCode;
use tokio::time::{MissedTickBehavior, interval};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = AgentArgs::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let client = match TransportClient::new(args.transport_config()) {
        Ok(client) => client,
        Err(err) => {
            tracing::error!(error = %err, "invalid transport configuration");
            return ExitCode::FAILURE;
        }
    };

    let mut state = AgentState::new(args.agent_id.clone());
    tracing::info!(
        agent_id = %state.agent_id,
        server = %args.server,
        interval = ?args.interval(),
        "agent started"
    );

    if args.once {
        let report = run_cycle(&client, &mut state).await;
        tracing::info!(?report, "cycle finished");
        return if report.failures == 0 {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    let mut ticker = interval(args.interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let report = run_cycle(&client, &mut state).await;
                if report.failures > 0 {
                    tracing::warn!(failures = report.failures, "cycle finished with failures");
                } else {
                    tracing::debug!(?report, "cycle finished");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                return ExitCode::SUCCESS;
            }
        }
    }
}
