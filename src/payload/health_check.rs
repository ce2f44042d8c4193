use crate::frame::MessageKind;
use crate::payload::PayloadSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheckPayload {
    #[serde(rename = "a")]
    pub agent_id: String,

    #[serde(rename = "t", default)]
    pub timestamp_ms: u64,

    #[serde(rename = "s", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl PayloadSchema for HealthCheckPayload {
    const KIND: MessageKind = MessageKind::HealthCheck;
}
