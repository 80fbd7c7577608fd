//! Load Error Types

use std::path::PathBuf;
use thiserror::Error;

/// A JSON array element that cannot be turned into an alert record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedRecord {
    /// Element is not a JSON object
    #[error("record {index}: expected a JSON object, found {found}")]
    NotAnObject { index: usize, found: &'static str },

    /// Required field absent or null
    #[error("record {index}: missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    /// Field present but with an unusable value
    #[error("record {index}: field `{field}` has unusable value {value}")]
    InvalidField {
        index: usize,
        field: &'static str,
        value: String,
    },
}

impl MalformedRecord {
    /// Position of the offending element in the input array
    pub fn index(&self) -> usize {
        match self {
            Self::NotAnObject { index, .. }
            | Self::MissingField { index, .. }
            | Self::InvalidField { index, .. } => *index,
        }
    }
}

/// Errors while loading an alert file
#[derive(Debug, Error)]
pub enum LoadError {
    /// File could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is not valid JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Top-level value is not an array
    #[error("expected a top-level JSON array, found {0}")]
    NotAnArray(&'static str),

    /// Malformed record under the fail-fast policy
    #[error(transparent)]
    Malformed(#[from] MalformedRecord),
}

/// Short name of a JSON value's kind, for error messages
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
