use crate::frame::MessageKind;
use crate::payload::{PayloadError, PayloadMap, PayloadSchema};
use serde::{Deserialize, Serialize};

/// A remote command addressed to an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandPayload {
    #[serde(rename = "id")]
    pub command_id: String,

    #[serde(rename = "a")]
    pub action: String,

    #[serde(rename = "p", default)]
    pub params: PayloadMap,

    #[serde(rename = "ts", default)]
    pub timestamp_ms: u64,

    #[serde(rename = "sig", default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl PayloadSchema for CommandPayload {
    const KIND: MessageKind = MessageKind::Command;
}

impl CommandPayload {
    pub fn new(command_id: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            command_id: command_id.into(),
            action: action.into(),
            params: PayloadMap::new(),
            timestamp_ms: 0,
            signature: None,
        }
    }
}

/// The pending commands for one agent, as served by the commands endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandBatch {
    #[serde(default)]
    pub cmds: Vec<CommandPayload>,
}

impl PayloadSchema for CommandBatch {
    const KIND: MessageKind = MessageKind::Command;

    /// Also accepts a map holding a single command, which is read as a batch
    /// of one.
    fn parse(map: &PayloadMap) -> Result<Self, PayloadError> {
        if map.contains_key("cmds") {
            Ok(serde_json::from_value(serde_json::Value::Object(
                map.clone(),
            ))?)
        } else if map.is_empty() {
            Ok(CommandBatch::default())
        } else {
            Ok(CommandBatch {
                cmds: vec![CommandPayload::parse(map)?],
            })
        }
    }
}
