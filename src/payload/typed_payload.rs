use crate::frame::{Frame, FrameFlags, MessageKind};
use crate::payload::{
    AckPayload, CommandBatch, CommandResultPayload, ConfigRequestPayload, ConfigResponsePayload,
    DiscoveryPayload, HealthCheckPayload, MetricsPayload, PayloadError, PayloadMap, PayloadSchema,
};

/// Any payload, tagged by the message kind that carries it.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Metrics(MetricsPayload),
    Command(CommandBatch),
    CommandResult(CommandResultPayload),
    ConfigRequest(ConfigRequestPayload),
    ConfigResponse(ConfigResponsePayload),
    Discovery(DiscoveryPayload),
    HealthCheck(HealthCheckPayload),
    Ack(AckPayload),
}

impl Payload {
    pub fn kind(&self) -> MessageKind {
        match self {
            Payload::Metrics(_) => MessageKind::Metrics,
            Payload::Command(_) => MessageKind::Command,
            Payload::CommandResult(_) => MessageKind::CommandResult,
            Payload::ConfigRequest(_) => MessageKind::ConfigRequest,
            Payload::ConfigResponse(_) => MessageKind::ConfigResponse,
            Payload::Discovery(_) => MessageKind::Discovery,
            Payload::HealthCheck(_) => MessageKind::HealthCheck,
            Payload::Ack(_) => MessageKind::Ack,
        }
    }

    pub fn build(&self) -> Result<PayloadMap, PayloadError> {
        match self {
            Payload::Metrics(p) => p.build(),
            Payload::Command(p) => p.build(),
            Payload::CommandResult(p) => p.build(),
            Payload::ConfigRequest(p) => p.build(),
            Payload::ConfigResponse(p) => p.build(),
            Payload::Discovery(p) => p.build(),
            Payload::HealthCheck(p) => p.build(),
            Payload::Ack(p) => p.build(),
        }
    }

    /// Parses `map` with the schema that belongs to `kind`.
    pub fn parse(kind: MessageKind, map: &PayloadMap) -> Result<Self, PayloadError> {
        Ok(match kind {
            MessageKind::Metrics => Payload::Metrics(MetricsPayload::parse(map)?),
            MessageKind::Command => Payload::Command(CommandBatch::parse(map)?),
            MessageKind::CommandResult => {
                Payload::CommandResult(CommandResultPayload::parse(map)?)
            }
            MessageKind::ConfigRequest => {
                Payload::ConfigRequest(ConfigRequestPayload::parse(map)?)
            }
            MessageKind::ConfigResponse => {
                Payload::ConfigResponse(ConfigResponsePayload::parse(map)?)
            }
            MessageKind::Discovery => Payload::Discovery(DiscoveryPayload::parse(map)?),
            MessageKind::HealthCheck => Payload::HealthCheck(HealthCheckPayload::parse(map)?),
            MessageKind::Ack => Payload::Ack(AckPayload::parse(map)?),
        })
    }

    pub fn to_frame(&self, flags: FrameFlags) -> Result<Frame, PayloadError> {
        Ok(Frame::new(self.kind(), self.build()?).with_flags(flags))
    }

    /// Interprets a decoded frame according to its own kind byte.
    pub fn from_frame(frame: &Frame) -> Result<Self, PayloadError> {
        Self::parse(frame.kind, &frame.payload)
    }
}

macro_rules! impl_from_schema {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Payload {
                fn from(payload: $ty) -> Self {
                    Payload::$variant(payload)
                }
            }
        )*
    };
}

impl_from_schema! {
    Metrics => MetricsPayload,
    Command => CommandBatch,
    CommandResult => CommandResultPayload,
    ConfigRequest => ConfigRequestPayload,
    ConfigResponse => ConfigResponsePayload,
    Discovery => DiscoveryPayload,
    HealthCheck => HealthCheckPayload,
    Ack => AckPayload,
}
