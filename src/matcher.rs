//! The record grammar: a timestamp prefix followed either by `author: body`
//! or by a bare system notice.
//!
//! Both grammars are compiled once per process and never mutated, so they
//! can be shared freely.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Optional direction marks, optional `[`, the date, the time, an optional
/// AM/PM marker, an optional `]` and the `-`/`:` separator.
const SHARED_PREFIX: &str = r"^(?:\x{200E}|\x{200F})*\[?(\d{1,4}[-/.]\s?\d{1,4}[-/.]\s?\d{1,4})[,.]?\s\D*?(\d{1,2}[.:]\d{1,2}(?:[.:]\d{1,2})?)(?:(?:\s|\x{202F})([ap](?:\.\s?|\s?)m\.?))?\]?(?:\s-|:)?\s";
const AUTHOR_AND_BODY: &str = r"(.+?):\s((?s:.*))";
const BODY: &str = r"((?s:.*))";

lazy_static! {
    static ref REGEX_USER: Regex =
        Regex::new(&format!("(?i){SHARED_PREFIX}{AUTHOR_AND_BODY}")).unwrap();
    static ref REGEX_SYSTEM: Regex = Regex::new(&format!("(?i){SHARED_PREFIX}{BODY}")).unwrap();
}

/// The raw fields extracted from the start of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordFields<'a> {
    pub date: &'a str,
    pub time: &'a str,
    pub ampm: Option<&'a str>,
    /// `None` when the system grammar was used.
    pub author: Option<&'a str>,
    /// Everything after the prefix, up to the end of the record.
    pub body: &'a str,
}

/// Returns `true` if `line` matches the author+body grammar.
pub fn is_user_line(line: &str) -> bool {
    REGEX_USER.is_match(line)
}

/// Returns `true` if `line` starts a record of either kind.
///
/// Every line the author+body grammar accepts is also accepted here.
pub fn is_record_start(line: &str) -> bool {
    REGEX_SYSTEM.is_match(line)
}

/// Extracts the fields of a record with the grammar selected by `system`.
pub fn match_record(text: &str, system: bool) -> Option<RecordFields<'_>> {
    if system {
        REGEX_SYSTEM
            .captures(text)
            .and_then(|caps| fields(text, &caps, None, 4))
    } else {
        REGEX_USER.captures(text).and_then(|caps| {
            let author = caps.get(4).map(|m| m.as_str());
            fields(text, &caps, author, 5)
        })
    }
}

fn fields<'a>(
    text: &'a str,
    caps: &Captures<'a>,
    author: Option<&'a str>,
    body_group: usize,
) -> Option<RecordFields<'a>> {
    let body_start = caps.get(body_group)?.start();
    Some(RecordFields {
        date: caps.get(1)?.as_str(),
        time: caps.get(2)?.as_str(),
        ampm: caps.get(3).map(|m| m.as_str()).filter(|s| !s.is_empty()),
        author,
        body: &text[body_start..],
    })
}
