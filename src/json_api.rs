//! Bodies of the plain-JSON fallback protocol.
//!
//! Each body mirrors a binary payload field for field but uses full,
//! camelCase names instead of the short wire keys.

use crate::payload::{
    CommandPayload, CommandResultPayload, DiscoveredDevice, DiscoveryPayload, MetricsPayload,
    PayloadMap, serialize_finite_metrics,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    pub agent_id: String,
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default, serialize_with = "serialize_finite_metrics")]
    pub metrics: BTreeMap<String, f64>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl From<&MetricsPayload> for MetricsReport {
    fn from(p: &MetricsPayload) -> Self {
        Self {
            agent_id: p.agent_id.clone(),
            timestamp: p.timestamp_ms,
            metrics: p.metrics.clone(),
            status: p.status.clone(),
            signature: p.signature.clone(),
        }
    }
}

impl From<MetricsReport> for MetricsPayload {
    fn from(r: MetricsReport) -> Self {
        Self {
            agent_id: r.agent_id,
            timestamp_ms: r.timestamp,
            metrics: r.metrics,
            status: r.status,
            signature: r.signature,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandRecord {
    pub command_id: String,
    pub action: String,
    #[serde(default)]
    pub params: PayloadMap,
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl From<CommandPayload> for CommandRecord {
    fn from(p: CommandPayload) -> Self {
        Self {
            command_id: p.command_id,
            action: p.action,
            params: p.params,
            timestamp: p.timestamp_ms,
            signature: p.signature,
        }
    }
}

impl From<CommandRecord> for CommandPayload {
    fn from(r: CommandRecord) -> Self {
        Self {
            command_id: r.command_id,
            action: r.action,
            params: r.params,
            timestamp_ms: r.timestamp,
            signature: r.signature,
        }
    }
}

/// Response of `GET /commands/{agentId}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandList {
    #[serde(default)]
    pub commands: Vec<CommandRecord>,
}

/// Body of `POST /commands/{commandId}/result`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResultReport {
    pub command_id: String,
    #[serde(default)]
    pub result: PayloadMap,
    pub status: String,
    #[serde(default)]
    pub timestamp: u64,
}

impl From<&CommandResultPayload> for CommandResultReport {
    fn from(p: &CommandResultPayload) -> Self {
        Self {
            command_id: p.command_id.clone(),
            result: p.result.clone(),
            status: p.status.clone(),
            timestamp: p.timestamp_ms,
        }
    }
}

impl From<CommandResultReport> for CommandResultPayload {
    fn from(r: CommandResultReport) -> Self {
        Self {
            command_id: r.command_id,
            result: r.result,
            status: r.status,
            timestamp_ms: r.timestamp,
        }
    }
}

/// Response of `GET /config/{agentId}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigEnvelope {
    #[serde(default)]
    pub config: PayloadMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryReport {
    pub agent_id: String,
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default)]
    pub devices: Vec<DiscoveredDevice>,
}

impl From<&DiscoveryPayload> for DiscoveryReport {
    fn from(p: &DiscoveryPayload) -> Self {
        Self {
            agent_id: p.agent_id.clone(),
            timestamp: p.timestamp_ms,
            devices: p.devices.clone(),
        }
    }
}

impl From<DiscoveryReport> for DiscoveryPayload {
    fn from(r: DiscoveryReport) -> Self {
        Self {
            agent_id: r.agent_id,
            timestamp_ms: r.timestamp,
            devices: r.devices,
        }
    }
}

/// Generic reply to JSON POSTs and to `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReply {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusReply {
    pub fn ok() -> Self {
        Self {
            ok: true,
            message: None,
        }
    }
}
