use crate::frame::MessageKind;
use crate::payload::PayloadSchema;
use serde::{Deserialize, Serialize};

/// Server acknowledgement of a binary POST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AckPayload {
    #[serde(default = "default_ok")]
    pub ok: bool,

    #[serde(rename = "msg", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// An ACK with no body still acknowledges.
fn default_ok() -> bool {
    true
}

impl PayloadSchema for AckPayload {
    const KIND: MessageKind = MessageKind::Ack;
}

impl AckPayload {
    pub fn ok() -> Self {
        Self {
            ok: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: Some(message.into()),
        }
    }
}
