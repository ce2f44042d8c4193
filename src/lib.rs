//! Binary wire protocol shared by fleet telemetry agents and their server.
//!
//! - [`checksum`]: table-driven CRC32 used to detect corrupted frames.
//! - [`frame`]: the self-describing frame format and its codec.
//! - [`payload`]: typed schemas for every message kind and their short-keyed
//!   wire maps.
//! - [`json_api`]: full-name JSON bodies of the fallback protocol.

pub mod checksum;
pub mod constants;
pub mod frame;
pub mod json_api;
pub mod payload;
pub mod utils;
