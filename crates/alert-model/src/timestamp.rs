//! Timestamp Normalization
//!
//! Alert timestamps arrive either as text (RFC 3339, Suricata EVE style with a
//! colon-less offset, or naive UTC) or as a numeric epoch in milliseconds.
//! Unparseable input never fails; it becomes [`AlertTimestamp::Invalid`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Offset-carrying formats tried after RFC 3339
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Formats without an offset, interpreted as UTC
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Normalized alert time
///
/// Valid timestamps order before invalid ones; valid timestamps order by instant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AlertTimestamp {
    /// Parsed instant
    Valid(DateTime<Utc>),
    /// Raw input that could not be parsed
    Invalid(String),
}

impl AlertTimestamp {
    /// Parse a textual timestamp
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Self::Valid(dt.with_timezone(&Utc));
        }

        for format in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(text, format) {
                return Self::Valid(dt.with_timezone(&Utc));
            }
        }

        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                return Self::Valid(Utc.from_utc_datetime(&naive));
            }
        }

        if let Some(midnight) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
        {
            return Self::Valid(Utc.from_utc_datetime(&midnight));
        }

        Self::Invalid(raw.to_string())
    }

    /// Interpret a number as milliseconds since the Unix epoch
    pub fn from_epoch_millis(millis: i64) -> Self {
        match Utc.timestamp_millis_opt(millis).single() {
            Some(dt) => Self::Valid(dt),
            None => Self::Invalid(millis.to_string()),
        }
    }

    /// Normalize a raw JSON value (string or epoch milliseconds)
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::parse(text),
            Value::Number(number) => {
                if let Some(millis) = number.as_i64() {
                    Self::from_epoch_millis(millis)
                } else {
                    match number.as_f64() {
                        Some(millis) if millis.is_finite() && millis.abs() < i64::MAX as f64 => {
                            Self::from_epoch_millis(millis.trunc() as i64)
                        }
                        _ => Self::Invalid(number.to_string()),
                    }
                }
            }
            other => Self::Invalid(other.to_string()),
        }
    }

    /// Parsed instant, if valid
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Valid(dt) => Some(*dt),
            Self::Invalid(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

impl From<DateTime<Utc>> for AlertTimestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Valid(dt)
    }
}

impl fmt::Display for AlertTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Self::Invalid(raw) => write!(f, "<invalid: {}>", raw),
        }
    }
}

/// Valid timestamps serialize as RFC 3339 text, invalid ones as `null`
impl Serialize for AlertTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Valid(dt) => {
                serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Self::Invalid(_) => serializer.serialize_none(),
        }
    }
}
