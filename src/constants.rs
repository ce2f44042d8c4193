/// Sentinel written as the first byte of every frame.
pub const FRAME_MAGIC: u8 = 0x50;

/// Protocol version written as the second byte of every frame.
/// Receivers reject any other value.
pub const FRAME_VERSION: u8 = 1;

// Frame related constants
pub const FRAME_MAGIC_OFFSET: usize = 0;
pub const FRAME_VERSION_OFFSET: usize = 1;
pub const FRAME_KIND_OFFSET: usize = 2;
pub const FRAME_FLAGS_OFFSET: usize = 3;
pub const FRAME_LENGTH_OFFSET: usize = 4;
pub const FRAME_LENGTH_FIELD_SIZE: usize = 4;
pub const FRAME_HEADER_SIZE: usize = 8;

/// Size in bytes of the trailing CRC32 (u32, big-endian).
pub const FRAME_CHECKSUM_SIZE: usize = 4;

/// Smallest buffer that can possibly hold a frame: header plus checksum,
/// with an empty payload.
pub const FRAME_MIN_SIZE: usize = FRAME_HEADER_SIZE + FRAME_CHECKSUM_SIZE; // 8 + 4 = 12

/// Serialized payloads longer than this are compressed before framing.
pub const COMPRESSION_THRESHOLD: usize = 1024;

/// Content type label used for binary request and response bodies.
pub const BINARY_CONTENT_TYPE: &str = "application/msgpack";

/// Upper bound on a payload after decompression. Frames that would inflate
/// past this are rejected instead of being buffered.
pub const MAX_DECOMPRESSED_PAYLOAD_SIZE: usize = 16 * 1024 * 1024;
