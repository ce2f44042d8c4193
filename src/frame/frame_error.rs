use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameEncodeError {
    /// The payload map could not be turned into bytes.
    #[error("payload serialization failed: {0}")]
    Serialization(String),

    #[error("payload compression failed: {0}")]
    Compression(String),

    /// The payload does not fit the 32-bit length field.
    #[error("payload of {0} bytes exceeds the frame length limit")]
    PayloadTooLarge(usize),
}

/// Reasons a byte buffer was rejected as a frame.
///
/// Every variant is final: the frame is discarded and nothing is retried at
/// this layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameDecodeError {
    /// Fewer bytes than the fixed header plus checksum.
    #[error("frame too short: {len} bytes")]
    FrameTooShort { len: usize },

    #[error("invalid magic byte {0:#04x}")]
    InvalidMagic(u8),

    #[error("unsupported protocol version {0}")]
    UnsupportedVersion(u8),

    #[error("checksum mismatch: frame carries {expected:#010x}, computed {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    /// The declared payload length disagrees with the bytes actually present.
    #[error("declared payload length {declared} but {available} bytes are present")]
    LengthMismatch { declared: usize, available: usize },

    #[error("unknown message kind {0}")]
    UnknownKind(u8),

    #[error("payload decompression failed: {0}")]
    Decompression(String),

    #[error("payload deserialization failed: {0}")]
    Serialization(String),
}

