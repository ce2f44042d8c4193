use crate::frame::MessageKind;
use crate::payload::{PayloadMap, PayloadSchema};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigRequestPayload {
    #[serde(rename = "a")]
    pub agent_id: String,
}

impl PayloadSchema for ConfigRequestPayload {
    const KIND: MessageKind = MessageKind::ConfigRequest;
}

/// Agent configuration pushed by the server. The contents are opaque to the
/// protocol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigResponsePayload {
    #[serde(rename = "cfg", default)]
    pub config: PayloadMap,
}

impl PayloadSchema for ConfigResponsePayload {
    const KIND: MessageKind = MessageKind::ConfigResponse;
}
