//! Serialization helpers shared by response DTOs.

// This module shadows the `serde` crate name; imports go through `::serde`.
use ::serde::Serializer;
use chrono::{DateTime, SecondsFormat, Utc};

/// Serialize a timestamp as RFC 3339 with exactly three fractional
/// digits, e.g. `2026-03-01T07:30:05.123Z`.
///
/// Response DTOs opt in per field with
/// `#[serde(serialize_with = "to_rfc3339_ms")]`, keeping the wire format
/// stable regardless of the nanosecond precision stored internally.
pub fn to_rfc3339_ms<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}
