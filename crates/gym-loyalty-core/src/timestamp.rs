//! Lenient timestamp decoding for API records.
//!
//! RFC 3339 is expected. Timestamps sent without an offset are read as UTC
//! instead of failing the whole record.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an RFC 3339 timestamp, or a naive one as offset zero.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts);
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

fn parse_or_error<E: de::Error>(raw: &str) -> Result<DateTime<FixedOffset>, E> {
    parse_timestamp(raw).ok_or_else(|| E::custom(format!("invalid timestamp: {raw}")))
}

/// Serde helper: a timestamp keeping the offset it was sent with.
///
/// # Errors
///
/// Fails if the value is not a string in a supported format.
pub fn deserialize_offset<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_or_error(&raw)
}

/// Serde helper: a timestamp converted to UTC.
///
/// # Errors
///
/// Fails if the value is not a string in a supported format.
pub fn deserialize_utc<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_offset(deserializer).map(|ts| ts.with_timezone(&Utc))
}

/// Serde helper: like [`deserialize_utc`], but `null`/absent stays `None`.
///
/// # Errors
///
/// Fails if a present value is not a string in a supported format.
pub fn deserialize_utc_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_or_error(&raw).map(|ts| ts.with_timezone(&Utc)))
        .transpose()
}
