use crate::frame::MessageKind;
use crate::payload::{PayloadMap, PayloadSchema};
use serde::{Deserialize, Serialize};

/// The outcome of a command, reported back by the agent that ran it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResultPayload {
    #[serde(rename = "id")]
    pub command_id: String,

    #[serde(rename = "r", default)]
    pub result: PayloadMap,

    #[serde(rename = "st")]
    pub status: String,

    #[serde(rename = "ts", default)]
    pub timestamp_ms: u64,
}

impl PayloadSchema for CommandResultPayload {
    const KIND: MessageKind = MessageKind::CommandResult;
}
