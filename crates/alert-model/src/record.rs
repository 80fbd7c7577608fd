//! Alert Record Decoding

use crate::error::{json_kind, MalformedRecord};
use crate::timestamp::AlertTimestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// Alert severity as reported by the sensor.
///
/// Suricata uses integer levels (1 = most severe); other producers label
/// alerts with names such as `"high"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Severity {
    Level(i64),
    Named(String),
}

impl Severity {
    /// Numeric level, if this severity is one
    pub fn level(&self) -> Option<i64> {
        match self {
            Self::Level(level) => Some(*level),
            Self::Named(_) => None,
        }
    }

    /// Decode a raw `alert.severity` value. Integers, integral floats and
    /// numeric strings become levels; other numbers and non-empty strings
    /// become names.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => Some(
                integral(number)
                    .map(Self::Level)
                    .unwrap_or_else(|| Self::Named(number.to_string())),
            ),
            Value::String(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return None;
                }
                Some(
                    text.parse()
                        .map(Self::Level)
                        .unwrap_or_else(|_| Self::Named(text.to_string())),
                )
            }
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level(level) => write!(f, "{}", level),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// One alert, as loaded from the JSON array
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRecord {
    pub timestamp: AlertTimestamp,
    pub flow_id: u64,
    pub severity: Severity,
    pub src_ip: String,
}

impl AlertRecord {
    /// Decode the element at `index` of the input array.
    ///
    /// Fields other than `timestamp`, `flow_id`, `src_ip` and `alert.severity`
    /// are ignored. An unparseable timestamp is kept as
    /// [`AlertTimestamp::Invalid`]; only an absent one is malformed.
    pub fn from_value(index: usize, value: &Value) -> Result<Self, MalformedRecord> {
        let object = value.as_object().ok_or(MalformedRecord::NotAnObject {
            index,
            found: json_kind(value),
        })?;

        let timestamp = required(index, object.get("timestamp"), "timestamp")?;
        let flow_id = required(index, object.get("flow_id"), "flow_id")?;
        let severity = required(
            index,
            object.get("alert").and_then(|alert| alert.get("severity")),
            "alert.severity",
        )?;
        let src_ip = required(index, object.get("src_ip"), "src_ip")?;

        Ok(Self {
            timestamp: AlertTimestamp::from_value(timestamp),
            flow_id: parse_unsigned(flow_id).ok_or_else(|| invalid(index, "flow_id", flow_id))?,
            severity: Severity::from_value(severity)
                .ok_or_else(|| invalid(index, "alert.severity", severity))?,
            src_ip: src_ip
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid(index, "src_ip", src_ip))?,
        })
    }
}

fn required<'a>(
    index: usize,
    value: Option<&'a Value>,
    field: &'static str,
) -> Result<&'a Value, MalformedRecord> {
    match value {
        Some(Value::Null) | None => Err(MalformedRecord::MissingField { index, field }),
        Some(value) => Ok(value),
    }
}

fn invalid(index: usize, field: &'static str, value: &Value) -> MalformedRecord {
    MalformedRecord::InvalidField {
        index,
        field,
        value: value.to_string(),
    }
}

/// Accept non-negative integers, either as JSON numbers or numeric strings
fn parse_unsigned(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => integral(number).and_then(|n| u64::try_from(n).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Integer value of a JSON number, including floats like `1.0`
fn integral(number: &Number) -> Option<i64> {
    // Beyond 2^53 a float no longer holds every integer exactly
    const EXACT: f64 = 9_007_199_254_740_992.0;

    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() <= EXACT)
            .map(|f| f as i64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "timestamp": "2024-03-01T10:00:00.000000+0000",
            "flow_id": 1234567890123456u64,
            "event_type": "alert",
            "src_ip": "10.0.0.5",
            "dest_ip": "10.0.0.1",
            "alert": { "signature": "ET SCAN", "severity": 2 }
        })
    }

    #[test]
    fn test_decode_full_record() {
        let record = AlertRecord::from_value(0, &sample()).unwrap();
        assert_eq!(record.flow_id, 1234567890123456);
        assert_eq!(record.severity, Severity::Level(2));
        assert_eq!(record.src_ip, "10.0.0.5");
        assert!(record.timestamp.is_valid());
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let mut value = sample();
        value["flow_id"] = json!("42");
        value["alert"]["severity"] = json!("3");

        let record = AlertRecord::from_value(0, &value).unwrap();
        assert_eq!(record.flow_id, 42);
        assert_eq!(record.severity, Severity::Level(3));
    }

    #[test]
    fn test_named_and_float_severities() {
        let decode = |severity: Value| {
            let mut value = sample();
            value["alert"]["severity"] = severity;
            AlertRecord::from_value(0, &value).map(|record| record.severity)
        };

        assert_eq!(decode(json!("high")), Ok(Severity::Named("high".into())));
        assert_eq!(decode(json!(" critical ")), Ok(Severity::Named("critical".into())));
        assert_eq!(decode(json!(1.0)), Ok(Severity::Level(1)));
        assert_eq!(decode(json!(2.5)), Ok(Severity::Named("2.5".into())));
        assert_eq!(decode(json!(-1)), Ok(Severity::Level(-1)));
        assert!(matches!(
            decode(json!("")),
            Err(MalformedRecord::InvalidField { field: "alert.severity", .. })
        ));
        assert!(matches!(
            decode(json!(true)),
            Err(MalformedRecord::InvalidField { field: "alert.severity", .. })
        ));
    }

    #[test]
    fn test_severity_serializes_as_value() {
        assert_eq!(serde_json::to_value(Severity::Level(3)).unwrap(), json!(3));
        assert_eq!(serde_json::to_value(Severity::Named("low".into())).unwrap(), json!("low"));
        assert_eq!(Severity::Named("low".into()).to_string(), "low");
    }

    #[test]
    fn test_integral_float_flow_id() {
        let mut value = sample();
        value["flow_id"] = json!(42.0);
        assert_eq!(AlertRecord::from_value(0, &value).unwrap().flow_id, 42);
    }

    #[test]
    fn test_missing_severity() {
        let mut value = sample();
        value["alert"] = json!({ "signature": "ET SCAN" });

        let err = AlertRecord::from_value(7, &value).unwrap_err();
        assert_eq!(
            err,
            MalformedRecord::MissingField {
                index: 7,
                field: "alert.severity"
            }
        );
        assert_eq!(err.index(), 7);
    }

    #[test]
    fn test_null_field_is_missing() {
        let mut value = sample();
        value["src_ip"] = Value::Null;

        let err = AlertRecord::from_value(1, &value).unwrap_err();
        assert!(matches!(err, MalformedRecord::MissingField { field: "src_ip", .. }));
    }

    #[test]
    fn test_invalid_flow_id() {
        let mut value = sample();
        value["flow_id"] = json!(-5);

        let err = AlertRecord::from_value(2, &value).unwrap_err();
        assert!(matches!(err, MalformedRecord::InvalidField { field: "flow_id", .. }));
    }

    #[test]
    fn test_not_an_object() {
        let err = AlertRecord::from_value(3, &json!([1, 2])).unwrap_err();
        assert_eq!(err, MalformedRecord::NotAnObject { index: 3, found: "array" });
    }

    #[test]
    fn test_bad_timestamp_is_not_malformed() {
        let mut value = sample();
        value["timestamp"] = json!("not a date");

        let record = AlertRecord::from_value(0, &value).unwrap();
        assert!(!record.timestamp.is_valid());
    }
}
