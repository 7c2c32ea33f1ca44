//! Timestamps and version tokens.
//!
//! All item timestamps are UTC with millisecond precision. Keeping every
//! backend at the same precision means the value a client reads back is the
//! value that was stored, so the `updatedOn` token survives a round trip.
//!
//! The version token of an item is its `updatedOn` rendered by
//! [`render_token`]. The same rendering is used in the JSON body, the `Etag`
//! response header, and when comparing an `If-Match` request header.

use chrono::{DateTime, SecondsFormat, SubsecRound, TimeDelta, Utc};

/// Truncates a timestamp to whole milliseconds.
pub fn truncate_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(3)
}

/// The current time, truncated to milliseconds.
pub fn now_millis() -> DateTime<Utc> {
    truncate_millis(Utc::now())
}

/// The timestamp to stamp on a write that replaces `previous`.
///
/// Always strictly later than `previous`, even when the clock has not
/// advanced a full millisecond since the last write.
pub fn next_timestamp(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = now_millis();
    match previous {
        Some(prev) if now <= prev => prev + TimeDelta::milliseconds(1),
        _ => now,
    }
}

/// Renders a timestamp as a version token, e.g. `2024-01-15T10:30:00.123Z`.
pub fn render_token(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses any RFC 3339 timestamp, normalized to UTC milliseconds.
pub fn parse_token(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|ts| truncate_millis(ts.with_timezone(&Utc)))
}

/// Serde adapter for optional timestamps rendered as version tokens.
pub mod token_format {
    use chrono::{DateTime, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes `Some(ts)` as its token string and `None` as null.
    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&super::render_token(ts)),
            None => serializer.serialize_none(),
        }
    }

    /// Accepts an RFC 3339 string or null.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| super::parse_token(&s).map_err(D::Error::custom))
            .transpose()
    }
}
