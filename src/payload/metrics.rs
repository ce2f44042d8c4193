use crate::frame::MessageKind;
use crate::payload::PayloadSchema;
use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};
use std::collections::BTreeMap;

/// A periodic metrics report from one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsPayload {
    #[serde(rename = "a")]
    pub agent_id: String,

    /// Milliseconds since the UNIX epoch.
    #[serde(rename = "t", default)]
    pub timestamp_ms: u64,

    #[serde(rename = "m", default, serialize_with = "serialize_compact_numbers")]
    pub metrics: BTreeMap<String, f64>,

    #[serde(rename = "s")]
    pub status: String,

    #[serde(rename = "sig", default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl PayloadSchema for MetricsPayload {
    const KIND: MessageKind = MessageKind::Metrics;
}

impl MetricsPayload {
    pub fn new(agent_id: impl Into<String>, timestamp_ms: u64, status: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            timestamp_ms,
            metrics: BTreeMap::new(),
            status: status.into(),
            signature: None,
        }
    }

    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }
}

/// Whole-valued readings go out as integers, which MessagePack packs into
/// as little as one byte instead of nine.
fn serialize_compact_numbers<S>(metrics: &BTreeMap<String, f64>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = s.serialize_map(Some(metrics.len()))?;
    for (name, &value) in metrics {
        check_finite::<S::Error>(name, value)?;
        if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            map.serialize_entry(name, &(value as i64))?;
        } else {
            map.serialize_entry(name, &value)?;
        }
    }
    map.end()
}

/// Writes metrics as plain floats, refusing NaN and infinities.
///
/// Used by the JSON fallback body, where a non-finite value would otherwise
/// be written as `null`.
pub(crate) fn serialize_finite_metrics<S>(
    metrics: &BTreeMap<String, f64>,
    s: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = s.serialize_map(Some(metrics.len()))?;
    for (name, value) in metrics {
        check_finite::<S::Error>(name, *value)?;
        map.serialize_entry(name, value)?;
    }
    map.end()
}

fn check_finite<E: serde::ser::Error>(name: &str, value: f64) -> Result<(), E> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(E::custom(format!("metric {name} is not finite ({value})")))
    }
}
