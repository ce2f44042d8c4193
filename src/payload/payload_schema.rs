use crate::frame::{Frame, MessageKind};
use crate::payload::{PayloadError, PayloadMap};
use serde::{Serialize, de::DeserializeOwned};

/// Couples a payload struct with the message kind that carries it and the
/// conversions to and from its wire map.
///
/// Implementors only declare `KIND`; the short keys come from the struct's
/// serde attributes. Absent optional fields parse as `None` or their default
/// rather than failing.
pub trait PayloadSchema: Serialize + DeserializeOwned {
    const KIND: MessageKind;

    /// Builds the short-keyed map for this payload.
    fn build(&self) -> Result<PayloadMap, PayloadError> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(PayloadError::Serialization(format!(
                "{} payload serialized to a non-map value: {other}",
                Self::KIND
            ))),
        }
    }

    /// Extracts the typed payload from a short-keyed map.
    fn parse(map: &PayloadMap) -> Result<Self, PayloadError> {
        Ok(serde_json::from_value(serde_json::Value::Object(
            map.clone(),
        ))?)
    }

    /// Builds the payload and wraps it in a frame of `KIND`.
    fn to_frame(&self) -> Result<Frame, PayloadError> {
        Ok(Frame::new(Self::KIND, self.build()?))
    }

    /// Parses the payload out of `frame`, refusing frames of any other kind.
    fn from_frame(frame: &Frame) -> Result<Self, PayloadError> {
        if frame.kind != Self::KIND {
            return Err(PayloadError::KindMismatch {
                expected: Self::KIND,
                actual: frame.kind,
            });
        }
        Self::parse(&frame.payload)
    }
}
