//! Top-N Ranking
//!
//! Equal counts keep the order in which their values first appeared.

use alert_model::AlertRecord;
use serde::Serialize;
use std::collections::HashMap;

/// Default length of the source IP ranking
pub const TOP_SOURCES_DEFAULT: usize = 10;

/// One slice of the source IP display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceIpCount {
    pub src_ip: String,
    pub count: usize,
}

/// Rank values by frequency, most frequent first, keeping at most `n`
pub fn top_values<'a, I>(values: I, n: usize) -> Vec<(&'a str, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut positions: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(&'a str, usize)> = Vec::new();

    for value in values {
        match positions.get(value) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }

    // sort_by is stable, so ties stay in first-occurrence order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);
    counts
}

/// Most frequent source IPs, at most `n` entries
pub fn top_source_ips(records: &[AlertRecord], n: usize) -> Vec<SourceIpCount> {
    top_values(records.iter().map(|r| r.src_ip.as_str()), n)
        .into_iter()
        .map(|(src_ip, count)| SourceIpCount {
            src_ip: src_ip.to_string(),
            count,
        })
        .collect()
}
