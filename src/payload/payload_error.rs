use crate::frame::MessageKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayloadError {
    /// The frame's kind does not match the schema the caller asked for.
    #[error("expected a {expected} payload, got {actual}")]
    KindMismatch {
        expected: MessageKind,
        actual: MessageKind,
    },

    /// A required field is missing or has the wrong type.
    #[error("payload serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PayloadError {
    fn from(err: serde_json::Error) -> Self {
        PayloadError::Serialization(err.to_string())
    }
}
