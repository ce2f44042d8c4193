use crate::frame::{FrameFlags, MessageKind};
use crate::payload::PayloadMap;

/// One logical message, before encoding or after decoding.
///
/// A frame is built fresh for each exchange, encoded, sent and dropped.
/// Nothing holds on to frames between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Which payload schema `payload` follows.
    ///
    /// The codec does not check the payload against the kind; callers must
    /// look at `kind` before interpreting `payload`.
    pub kind: MessageKind,

    /// Header flags.
    ///
    /// On encode these are the caller's requested flags; the codec adds
    /// `COMPRESSED` on its own when the payload crosses the compression
    /// threshold. On decode these are exactly the flags found on the wire.
    pub flags: FrameFlags,

    /// The short-keyed payload map.
    pub payload: PayloadMap,
}

impl Frame {
    pub fn new(kind: MessageKind, payload: PayloadMap) -> Self {
        Self {
            kind,
            flags: FrameFlags::NONE,
            payload,
        }
    }

    pub fn with_flags(mut self, flags: FrameFlags) -> Self {
        self.flags = flags;
        self
    }
}
