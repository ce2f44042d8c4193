use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings a [`TransportClient`](crate::TransportClient) is built with.
///
/// Fixed for the lifetime of the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Server root, e.g. `http://fleet.example:3000`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer credential sent with every request.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Bound on each individual request. A call that falls back can take up
    /// to twice this.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// When `false`, every operation goes straight to JSON.
    #[serde(default = "default_true")]
    pub prefer_binary: bool,
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            prefer_binary: true,
        }
    }
}

impl TransportConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
