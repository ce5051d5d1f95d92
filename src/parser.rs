use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace, warn};

use crate::attachment::parse_message_attachment;
use crate::datetime::{
    DateToken, OrderedDate, assemble_timestamp, convert_time_12_to_24, normalize_ampm,
    normalize_date, normalize_time, order_date_components,
};
use crate::disambiguate::days_before_months;
use crate::matcher::{self, RecordFields};
use crate::models::{Message, ParseStringOptions, RawMessage};

lazy_static! {
    static ref REGEX_NEWLINES: Regex = Regex::new(r"\r\n|\r|\n").unwrap();
}

/// Left-to-right mark the exporter uses to flag system notices.
const LEFT_TO_RIGHT_MARK: char = '\u{200E}';

/// How many leading messages the encryption notice rule looks at.
const ENCRYPTION_NOTICE_WINDOW: usize = 10;

/// Splits a document into physical lines on `\r\n`, `\r` or `\n`.
pub fn split_lines(text: &str) -> Vec<&str> {
    REGEX_NEWLINES.split(text).collect()
}

/// A line carrying exactly one left-to-right mark is a system notice even
/// when it looks like `author: body`.
fn is_flagged_system_notice(line: &str) -> bool {
    line.matches(LEFT_TO_RIGHT_MARK).count() == 1
}

/// Takes an array of lines and detects the lines that are part of a previous
/// message (multiline messages) and merges them.
///
/// It also labels messages without an author as system messages. Lines
/// before the first message are dropped.
pub fn make_array_of_messages(lines: &[&str]) -> Vec<RawMessage> {
    let mut acc: Vec<RawMessage> = Vec::new();
    let mut orphans = 0usize;

    for (line_idx, line) in lines.iter().enumerate() {
        if !matcher::is_record_start(line) {
            if let Some(prev_message) = acc.last_mut() {
                trace!(line = line_idx + 1, "continuation line");
                prev_message.msg.push('\n');
                prev_message.msg.push_str(line);
            } else {
                trace!(line = line_idx + 1, "line before the first message, dropping");
                orphans += 1;
            }
            continue;
        }

        let system = !matcher::is_user_line(line) || is_flagged_system_notice(line);
        trace!(line = line_idx + 1, system, "new message");
        acc.push(RawMessage {
            system,
            msg: (*line).to_string(),
        });
    }

    debug!(
        messages = acc.len(),
        system = acc.iter().filter(|m| m.system).count(),
        dropped = orphans,
        "message aggregation complete"
    );

    acc
}

/// A record that went through the first pass and only waits for the
/// document-wide day/month order.
struct PendingMessage<'a> {
    fields: RecordFields<'a>,
    date: OrderedDate<'a>,
}

impl PendingMessage<'_> {
    fn finish(&self, days_first: bool, parse_attachments: bool) -> Message {
        let (day, month, year) = self.date.day_month_year(days_first);
        let (year, month, day) = normalize_date(year, month, day);

        let time = match self.fields.ampm {
            Some(ampm) => {
                normalize_time(&convert_time_12_to_24(self.fields.time, &normalize_ampm(ampm)))
            }
            None => normalize_time(self.fields.time),
        };

        let body = self.fields.body;
        let body = body.strip_suffix('\n').unwrap_or(body).to_string();
        let attachment = if parse_attachments {
            parse_message_attachment(&body)
        } else {
            None
        };

        Message {
            timestamp: assemble_timestamp(&year, &month, &day, &time),
            author: self.fields.author.map(str::to_string),
            body,
            attachment,
        }
    }
}

/// Parses an array of raw messages into an array of structured objects.
///
/// The day/month order needs every date of the document, so this runs in two
/// passes: the first extracts the fields and collects the dates, the second
/// builds the timestamps once the order is known.
pub fn parse_messages(messages: &[RawMessage], options: &ParseStringOptions) -> Vec<Message> {
    let mut pending = Vec::with_capacity(messages.len());
    let mut numeric_dates: Vec<DateToken> = Vec::with_capacity(messages.len());

    for raw in messages {
        let Some(fields) = matcher::match_record(&raw.msg, raw.system) else {
            debug!(system = raw.system, "record does not match its grammar, skipping");
            continue;
        };
        let date = match order_date_components(fields.date) {
            Ok(date) => date,
            Err(err) => {
                warn!(%err, "skipping record");
                continue;
            }
        };

        numeric_dates.push(date.to_token());
        pending.push(PendingMessage { fields, date });
    }

    let days_first = match options.days_first {
        Some(days_first) => days_first,
        None => {
            let order = days_before_months(&numeric_dates);
            debug!(?order, dates = numeric_dates.len(), "inferred date order");
            order.days_first().unwrap_or(true)
        }
    };

    let mut result: Vec<Message> = pending
        .iter()
        .map(|p| p.finish(days_first, options.parse_attachments))
        .collect();

    for message in result.iter_mut().take(ENCRYPTION_NOTICE_WINDOW) {
        if message.body.contains("end-to-end") {
            message.author = None;
        }
    }

    debug!(
        messages = result.len(),
        days_first,
        with_attachments = result.iter().filter(|m| m.attachment.is_some()).count(),
        "message parsing complete"
    );

    result
}
