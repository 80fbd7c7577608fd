//! Alert File Loader

use crate::error::{json_kind, LoadError};
use crate::record::AlertRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// What to do with array elements that cannot be decoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Drop the element, count it, keep loading
    #[default]
    Skip,
    /// Abort the load on the first malformed element
    FailFast,
}

/// Loader configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Handling of malformed elements
    #[serde(default)]
    pub malformed_policy: MalformedPolicy,
}

/// Records produced by one load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedAlerts {
    /// Decoded records, in input order
    pub records: Vec<AlertRecord>,
    /// Elements skipped as malformed
    pub malformed: usize,
}

impl LoadedAlerts {
    /// Wrap already-decoded records
    pub fn from_records(records: Vec<AlertRecord>) -> Self {
        Self {
            records,
            malformed: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Loads alert arrays from JSON text or files
pub struct AlertLoader {
    options: LoadOptions,
}

impl AlertLoader {
    /// Create a new loader with given options
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    /// Load from a file on disk
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<LoadedAlerts, LoadError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let loaded = self.load_str(&raw)?;
        info!(
            path = %path.display(),
            records = loaded.len(),
            malformed = loaded.malformed,
            "Loaded alert file"
        );
        Ok(loaded)
    }

    /// Load from JSON text
    pub fn load_str(&self, json: &str) -> Result<LoadedAlerts, LoadError> {
        let value: Value = serde_json::from_str(json)?;
        self.load_value(&value)
    }

    /// Load from an already-parsed JSON value
    pub fn load_value(&self, value: &Value) -> Result<LoadedAlerts, LoadError> {
        let entries = value
            .as_array()
            .ok_or_else(|| LoadError::NotAnArray(json_kind(value)))?;

        let mut loaded = LoadedAlerts {
            records: Vec::with_capacity(entries.len()),
            malformed: 0,
        };

        for (index, entry) in entries.iter().enumerate() {
            match AlertRecord::from_value(index, entry) {
                Ok(record) => loaded.records.push(record),
                Err(err) => match self.options.malformed_policy {
                    MalformedPolicy::Skip => {
                        warn!("Skipping malformed alert: {}", err);
                        loaded.malformed += 1;
                    }
                    MalformedPolicy::FailFast => return Err(err.into()),
                },
            }
        }

        debug!(
            "Decoded {} of {} alert entries",
            loaded.records.len(),
            entries.len()
        );
        Ok(loaded)
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }
}

impl Default for AlertLoader {
    fn default() -> Self {
        Self::new(LoadOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MalformedRecord;
    use crate::record::Severity;

    const MIXED: &str = r#"[
        {"timestamp": "2024-03-01T10:00:00Z", "flow_id": 1, "src_ip": "a", "alert": {"severity": 1}},
        {"timestamp": "2024-03-01T10:01:00Z", "flow_id": 2, "alert": {"severity": 1}},
        {"timestamp": "2024-03-01T10:02:00Z", "flow_id": 3, "src_ip": "a", "alert": {"severity": 2}}
    ]"#;

    #[test]
    fn test_skip_policy_counts_malformed() {
        let loaded = AlertLoader::default().load_str(MIXED).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.malformed, 1);
        assert_eq!(loaded.records[1].severity, Severity::Level(2));
    }

    #[test]
    fn test_mixed_severity_kinds_all_load() {
        let input = r#"[
            {"timestamp": "2024-03-01T10:00:00Z", "flow_id": 1, "src_ip": "a", "alert": {"severity": "high"}},
            {"timestamp": "2024-03-01T10:01:00Z", "flow_id": 2, "src_ip": "b", "alert": {"severity": 1.0}},
            {"timestamp": "2024-03-01T10:02:00Z", "flow_id": 3, "src_ip": "c", "alert": {"severity": 1}}
        ]"#;

        let loaded = AlertLoader::default().load_str(input).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.malformed, 0);
        assert_eq!(loaded.records[0].severity, Severity::Named("high".into()));
        assert_eq!(loaded.records[1].severity, loaded.records[2].severity);
    }

    #[test]
    fn test_fail_fast_policy() {
        let loader = AlertLoader::new(LoadOptions {
            malformed_policy: MalformedPolicy::FailFast,
        });

        match loader.load_str(MIXED) {
            Err(LoadError::Malformed(MalformedRecord::MissingField { index, field })) => {
                assert_eq!(index, 1);
                assert_eq!(field, "src_ip");
            }
            other => panic!("expected malformed error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_array() {
        let loaded = AlertLoader::default().load_str("[]").unwrap();
        assert!(loaded.is_empty());
        assert_eq!(loaded.malformed, 0);
    }

    #[test]
    fn test_top_level_must_be_array() {
        let err = AlertLoader::default().load_str(r#"{"Records": []}"#).unwrap_err();
        assert!(matches!(err, LoadError::NotAnArray("object")));
    }

    #[test]
    fn test_invalid_json() {
        let err = AlertLoader::default().load_str("[{").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = AlertLoader::default()
            .load_file("/nonexistent/alerts.json")
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_policy_from_config_text() {
        let options: LoadOptions =
            serde_json::from_str(r#"{"malformed_policy": "fail_fast"}"#).unwrap();
        assert_eq!(options.malformed_policy, MalformedPolicy::FailFast);

        let options: LoadOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.malformed_policy, MalformedPolicy::Skip);
    }
}
