//! Typed payload schemas and their short-keyed wire maps.
//!
//! Each message kind has a struct with named, typed fields. Conversion to
//! and from the compact [`PayloadMap`] happens only through [`PayloadSchema`],
//! right at the serialization boundary. Building and parsing never touch the
//! frame codec.

mod ack;
mod command;
mod command_result;
mod config;
mod discovery;
mod health_check;
mod metrics;
mod payload_error;
mod payload_schema;
mod typed_payload;

pub use ack::AckPayload;
pub use command::{CommandBatch, CommandPayload};
pub use command_result::CommandResultPayload;
pub use config::{ConfigRequestPayload, ConfigResponsePayload};
pub use discovery::{DiscoveredDevice, DiscoveryPayload};
pub use health_check::HealthCheckPayload;
pub use metrics::MetricsPayload;
pub(crate) use metrics::serialize_finite_metrics;
pub use payload_error::PayloadError;
pub use payload_schema::PayloadSchema;
pub use typed_payload::Payload;

/// Schemaless string-keyed map, the shape every payload takes on the wire.
pub type PayloadMap = serde_json::Map<String, serde_json::Value>;
