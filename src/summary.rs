//! Read-only views over a parsed message list.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::models::Message;

/// Unique authors in order of first appearance. System messages have no
/// author and are skipped.
pub fn unique_authors(messages: &[Message]) -> Vec<String> {
    let mut seen = HashSet::new();
    messages
        .iter()
        .filter_map(|m| m.author.as_deref())
        .filter(|author| seen.insert(*author))
        .map(str::to_string)
        .collect()
}

/// Timestamps of the first and the last message, by position rather than by
/// value.
pub fn date_range(messages: &[Message]) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let first = messages.first()?;
    let last = messages.last()?;
    Some((first.timestamp, last.timestamp))
}
