use crate::frame::MessageKind;
use crate::payload::{PayloadMap, PayloadSchema};
use serde::{Deserialize, Serialize};

/// Devices an agent found on its local network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryPayload {
    #[serde(rename = "a")]
    pub agent_id: String,

    #[serde(rename = "t", default)]
    pub timestamp_ms: u64,

    #[serde(rename = "d", default)]
    pub devices: Vec<DiscoveredDevice>,
}

impl PayloadSchema for DiscoveryPayload {
    const KIND: MessageKind = MessageKind::Discovery;
}

/// One discovered device. Only `ip` is required; anything else the scanner
/// learned (MAC, hostname, open ports) rides along in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveredDevice {
    pub ip: String,

    #[serde(flatten)]
    pub extra: PayloadMap,
}

impl DiscoveredDevice {
    pub fn new(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            extra: PayloadMap::new(),
        }
    }
}
