use clap::Parser;
use fleetwire_http_client::TransportConfig;
use std::time::Duration;

/// Fleetwire agent: reports metrics and runs commands on a fixed interval.
#[derive(Parser, Debug, Clone)]
#[command(name = "fleetwire-agent")]
#[command(author, version, about, long_about = None)]
pub struct AgentArgs {
    /// Server root URL
    #[arg(short, long, env = "FLEETWIRE_SERVER", default_value = "http://127.0.0.1:3000")]
    pub server: String,

    /// Bearer credential sent with every request
    #[arg(long, env = "FLEETWIRE_API_KEY")]
    pub api_key: Option<String>,

    /// Identifier this agent reports under
    #[arg(short, long, env = "FLEETWIRE_AGENT_ID")]
    pub agent_id: String,

    /// Seconds between report cycles
    #[arg(short, long, env = "FLEETWIRE_INTERVAL_SECS", default_value_t = 30)]
    pub interval_secs: u64,

    /// Per-request timeout in seconds
    #[arg(long, env = "FLEETWIRE_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Skip the binary protocol and talk JSON only
    #[arg(long)]
    pub json_only: bool,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,
}

impl AgentArgs {
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            base_url: self.server.clone(),
            api_key: self.api_key.clone(),
            timeout_secs: self.timeout_secs,
            prefer_binary: !self.json_only,
        }
    }

    pub fn interval(&self) -> Duration {
        // A zero period would make `tokio::time::interval` panic.
        Duration::from_secs(self.interval_secs.max(1))
    }
}
