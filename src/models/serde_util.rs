//! Custom serde helpers for timestamp wire formats.
//!
//! The API and webhook deliveries are not consistent about timestamps:
//! most send RFC 3339, some send a naive ISO string meaning UTC, and some
//! send Unix epoch seconds as an integer or a float.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{self, Visitor};

/// Naive layouts read as UTC. `%.f` also matches an absent fraction.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a timestamp string as RFC 3339, falling back to naive UTC.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
    type Value = DateTime<Utc>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an RFC 3339 or ISO 8601 date-time string, or Unix epoch seconds")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        parse_timestamp(v).ok_or_else(|| E::custom(format!("Invalid timestamp: {v}")))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        DateTime::from_timestamp(v, 0).ok_or_else(|| E::custom(format!("Invalid timestamp: {v}")))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or_else(|| E::custom(format!("Invalid timestamp: {v}")))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        let invalid = || E::custom(format!("Invalid timestamp: {v}"));
        // Keeps the casts below in range.
        if !v.is_finite() || v.abs() >= 1e15 {
            return Err(invalid());
        }
        let secs = v.floor();
        let nanos = ((v - secs) * 1e9).round().min(999_999_999.0) as u32;
        DateTime::from_timestamp(secs as i64, nanos).ok_or_else(invalid)
    }
}

/// Deserializes a `DateTime<Utc>` from any supported timestamp form.
pub mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::Deserializer;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(super::TimestampVisitor)
    }
}

/// Like [`timestamp`], for optional fields; `null` becomes `None`.
pub mod timestamp_opt {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    struct Wrapped(DateTime<Utc>);

    impl<'de> Deserialize<'de> for Wrapped {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            super::timestamp::deserialize(deserializer).map(Wrapped)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|w| w.0))
    }
}

