use crate::{
    checksum::crc32,
    constants::{
        COMPRESSION_THRESHOLD, FRAME_CHECKSUM_SIZE, FRAME_FLAGS_OFFSET, FRAME_HEADER_SIZE,
        FRAME_KIND_OFFSET, FRAME_LENGTH_FIELD_SIZE, FRAME_LENGTH_OFFSET, FRAME_MAGIC,
        FRAME_MAGIC_OFFSET, FRAME_MIN_SIZE, FRAME_VERSION, FRAME_VERSION_OFFSET,
        MAX_DECOMPRESSED_PAYLOAD_SIZE,
    },
    frame::{Frame, FrameDecodeError, FrameEncodeError, FrameFlags, MessageKind},
    payload::PayloadMap,
};
use flate2::{Compression, read::ZlibDecoder, write::ZlibEncoder};
use std::io::{Read, Write};

/// Encodes frames to bytes and decodes them back.
///
/// Wire layout (all integers big-endian):
///
/// ```text
/// magic(1) | version(1) | kind(1) | flags(1) | length(4) | payload(length) | crc32(4)
/// ```
///
/// The payload is the MessagePack form of the frame's payload map, deflated
/// with zlib when it is longer than [`COMPRESSION_THRESHOLD`]. The CRC covers
/// every byte before it.
///
/// Both directions are pure functions of their input and safe to call from
/// any number of threads at once.
pub struct FrameCodec;

impl FrameCodec {
    /// Encodes a `Frame` into a byte vector.
    ///
    /// # Errors
    ///
    /// Fails if the payload cannot be serialized or compressed, or if the
    /// resulting payload does not fit the 32-bit length field. A corrupt frame
    /// is never returned.
    pub fn encode(frame: &Frame) -> Result<Vec<u8>, FrameEncodeError> {
        let serialized = rmp_serde::to_vec_named(&frame.payload)
            .map_err(|e| FrameEncodeError::Serialization(e.to_string()))?;

        let mut flags = frame.flags;

        let payload = if serialized.len() > COMPRESSION_THRESHOLD {
            let compressed = compress(&serialized)?;
            tracing::debug!(
                kind = %frame.kind,
                raw_len = serialized.len(),
                compressed_len = compressed.len(),
                "compressing frame payload"
            );
            flags.insert(FrameFlags::COMPRESSED);
            compressed
        } else {
            // A stale COMPRESSED bit would make the receiver try to inflate
            // plain MessagePack.
            flags.remove(FrameFlags::COMPRESSED);
            serialized
        };

        let length = u32::try_from(payload.len())
            .map_err(|_| FrameEncodeError::PayloadTooLarge(payload.len()))?;

        let mut buf = Vec::with_capacity(FRAME_MIN_SIZE + payload.len());

        buf.push(FRAME_MAGIC);
        buf.push(FRAME_VERSION);
        buf.push(frame.kind.value());
        buf.push(flags.bits());
        buf.extend(&length.to_be_bytes());
        buf.extend(&payload);

        let checksum = crc32(&buf);
        buf.extend(&checksum.to_be_bytes());

        tracing::trace!(kind = %frame.kind, ?flags, len = buf.len(), "encoded frame");

        Ok(buf)
    }

    /// Decodes a byte slice into a `Frame`.
    ///
    /// Checks run in a fixed order: minimum size, magic, version, checksum,
    /// then the declared length. The checksum is verified before the length
    /// field is trusted, since corruption can land in any byte.
    pub fn decode(buf: &[u8]) -> Result<Frame, FrameDecodeError> {
        if buf.len() < FRAME_MIN_SIZE {
            return Err(FrameDecodeError::FrameTooShort { len: buf.len() });
        }

        let magic = buf[FRAME_MAGIC_OFFSET];
        if magic != FRAME_MAGIC {
            return Err(FrameDecodeError::InvalidMagic(magic));
        }

        let version = buf[FRAME_VERSION_OFFSET];
        if version != FRAME_VERSION {
            return Err(FrameDecodeError::UnsupportedVersion(version));
        }

        let (body, trailer) = buf.split_at(buf.len() - FRAME_CHECKSUM_SIZE);
        let expected = u32::from_be_bytes(read_array(trailer)?);
        let actual = crc32(body);
        if expected != actual {
            return Err(FrameDecodeError::ChecksumMismatch { expected, actual });
        }

        let kind_byte = buf[FRAME_KIND_OFFSET];
        let kind =
            MessageKind::try_from(kind_byte).map_err(|_| FrameDecodeError::UnknownKind(kind_byte))?;
        let flags = FrameFlags::from_bits_retain(buf[FRAME_FLAGS_OFFSET]);

        let declared = u32::from_be_bytes(read_array(
            &buf[FRAME_LENGTH_OFFSET..FRAME_LENGTH_OFFSET + FRAME_LENGTH_FIELD_SIZE],
        )?) as usize;
        let available = body.len() - FRAME_HEADER_SIZE;
        if declared != available {
            return Err(FrameDecodeError::LengthMismatch {
                declared,
                available,
            });
        }

        let raw_payload = &body[FRAME_HEADER_SIZE..];

        let inflated;
        let payload_bytes = if flags.is_compressed() {
            inflated = decompress(raw_payload)?;
            &inflated[..]
        } else {
            raw_payload
        };

        let payload: PayloadMap = rmp_serde::from_slice(payload_bytes)
            .map_err(|e| FrameDecodeError::Serialization(e.to_string()))?;

        tracing::trace!(%kind, ?flags, len = buf.len(), "decoded frame");

        Ok(Frame {
            kind,
            flags,
            payload,
        })
    }
}

fn read_array<const N: usize>(bytes: &[u8]) -> Result<[u8; N], FrameDecodeError> {
    bytes
        .try_into()
        .map_err(|_| FrameDecodeError::FrameTooShort { len: bytes.len() })
}

fn compress(bytes: &[u8]) -> Result<Vec<u8>, FrameEncodeError> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(bytes.len() / 2), Compression::default());
    encoder
        .write_all(bytes)
        .map_err(|e| FrameEncodeError::Compression(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| FrameEncodeError::Compression(e.to_string()))
}

fn decompress(bytes: &[u8]) -> Result<Vec<u8>, FrameDecodeError> {
    let mut out = Vec::new();
    ZlibDecoder::new(bytes)
        .take(MAX_DECOMPRESSED_PAYLOAD_SIZE as u64 + 1)
        .read_to_end(&mut out)
        .map_err(|e| FrameDecodeError::Decompression(e.to_string()))?;

    if out.len() > MAX_DECOMPRESSED_PAYLOAD_SIZE {
        return Err(FrameDecodeError::Decompression(format!(
            "inflated payload exceeds {MAX_DECOMPRESSED_PAYLOAD_SIZE} bytes"
        )));
    }

    Ok(out)
}
