use std::convert::TryFrom;
use std::fmt;

/// Discriminant written in the type byte of a frame.
///
/// The numeric values are part of the wire format and must never change.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Metrics = 1,
    Command = 2,
    CommandResult = 3,
    ConfigRequest = 4,
    ConfigResponse = 5,
    Discovery = 6,
    HealthCheck = 7,
    Ack = 8,
}

impl MessageKind {
    pub const ALL: [MessageKind; 8] = [
        MessageKind::Metrics,
        MessageKind::Command,
        MessageKind::CommandResult,
        MessageKind::ConfigRequest,
        MessageKind::ConfigResponse,
        MessageKind::Discovery,
        MessageKind::HealthCheck,
        MessageKind::Ack,
    ];

    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Metrics => "METRICS",
            MessageKind::Command => "COMMAND",
            MessageKind::CommandResult => "COMMAND_RESULT",
            MessageKind::ConfigRequest => "CONFIG_REQUEST",
            MessageKind::ConfigResponse => "CONFIG_RESPONSE",
            MessageKind::Discovery => "DISCOVERY",
            MessageKind::HealthCheck => "HEALTH_CHECK",
            MessageKind::Ack => "ACK",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for MessageKind {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MessageKind::Metrics),
            2 => Ok(MessageKind::Command),
            3 => Ok(MessageKind::CommandResult),
            4 => Ok(MessageKind::ConfigRequest),
            5 => Ok(MessageKind::ConfigResponse),
            6 => Ok(MessageKind::Discovery),
            7 => Ok(MessageKind::HealthCheck),
            8 => Ok(MessageKind::Ack),
            _ => Err(()),
        }
    }
}
