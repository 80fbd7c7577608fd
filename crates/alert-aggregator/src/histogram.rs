//! Severity Histogram

use alert_model::{AlertRecord, Severity};
use serde::Serialize;
use std::collections::HashMap;

/// One bar of the severity display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeverityCount {
    pub severity: Severity,
    pub count: usize,
}

/// Alert counts keyed by severity.
///
/// Numeric levels come first in ascending order, followed by named
/// severities in the order they first appear in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeverityHistogram {
    counts: Vec<SeverityCount>,
}

impl SeverityHistogram {
    /// Count records per severity
    pub fn from_records(records: &[AlertRecord]) -> Self {
        let mut counts: Vec<SeverityCount> = Vec::new();
        let mut slots: HashMap<&Severity, usize> = HashMap::new();

        for record in records {
            match slots.get(&record.severity) {
                Some(&slot) => counts[slot].count += 1,
                None => {
                    slots.insert(&record.severity, counts.len());
                    counts.push(SeverityCount {
                        severity: record.severity.clone(),
                        count: 1,
                    });
                }
            }
        }

        // Stable, so named severities keep first-seen order
        counts.sort_by_key(|entry| match entry.severity.level() {
            Some(level) => (false, level),
            None => (true, 0),
        });

        Self { counts }
    }

    /// Count for one severity (0 if never seen)
    pub fn get(&self, severity: &Severity) -> usize {
        self.counts
            .iter()
            .find(|entry| &entry.severity == severity)
            .map_or(0, |entry| entry.count)
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.counts.iter().map(|entry| entry.count).sum()
    }

    /// Number of distinct severities
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Severity, usize)> + '_ {
        self.counts.iter().map(|entry| (&entry.severity, entry.count))
    }

    /// `{severity, count}` pairs for display
    pub fn to_pairs(&self) -> Vec<SeverityCount> {
        self.counts.clone()
    }
}

/// Count records per severity
pub fn severity_histogram(records: &[AlertRecord]) -> SeverityHistogram {
    SeverityHistogram::from_records(records)
}
