mod frame_codec;
mod frame_error;
mod frame_flags;
mod frame_struct;
mod message_kind;

pub use frame_codec::FrameCodec;
pub use frame_error::{FrameDecodeError, FrameEncodeError};
pub use frame_flags::FrameFlags;
pub use frame_struct::Frame;
pub use message_kind::MessageKind;
