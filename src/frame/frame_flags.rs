bitflags::bitflags! {
    /// Bitmask carried in the flags byte of a frame header.
    ///
    /// Only `COMPRESSED` changes how a frame is processed. `ENCRYPTED`,
    /// `HAS_SIGNATURE` and `KEEPALIVE` are reserved: they are written and read
    /// back verbatim but never acted upon. Unknown bits are preserved as well.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct FrameFlags: u8 {
        const COMPRESSED = 1 << 0;
        const ENCRYPTED = 1 << 1;
        const HAS_SIGNATURE = 1 << 2;
        const KEEPALIVE = 1 << 3;

        // Keep undefined bits across `remove`, `toggle` and friends.
        const _ = !0;
    }
}

impl FrameFlags {
    pub const NONE: FrameFlags = FrameFlags::empty();

    #[inline]
    pub const fn is_compressed(self) -> bool {
        self.contains(FrameFlags::COMPRESSED)
    }
}
