// This module shadows the serde crate within the crate root, hence `::serde`.
use ::serde::Serializer;
use chrono::{DateTime, SecondsFormat, Utc};

/// Serialize a `DateTime<Utc>` as RFC 3339 with exactly three fractional
/// digits, the shape JavaScript's `Date#toISOString` produces and existing
/// API consumers parse.
pub fn to_rfc3339_ms<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}
