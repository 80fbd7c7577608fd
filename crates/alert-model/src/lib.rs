//! Alert Records
//!
//! Provides the alert record model, timestamp normalization, and loading of
//! JSON alert arrays with a configurable policy for malformed entries.

mod error;
mod loader;
mod record;
mod timestamp;

pub use error::{LoadError, MalformedRecord};
pub use loader::{AlertLoader, LoadOptions, LoadedAlerts, MalformedPolicy};
pub use record::{AlertRecord, Severity};
pub use timestamp::AlertTimestamp;
