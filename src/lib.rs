//! Parse exported chat logs into structured messages.
//!
//! Exports write dates as three numbers without saying whether the day or
//! the month comes first. Unless told through
//! [`ParseStringOptions::days_first`], the parser looks at every date in the
//! document and infers the order before building any timestamp.
//!
//! ```rust
//! use chatlog_parser::parse_string;
//!
//! let messages = parse_string("13/06/2018, 21:25 - Luke: Hey!\nhow are you?", None);
//!
//! assert_eq!(messages.len(), 1);
//! assert_eq!(messages[0].author.as_deref(), Some("Luke"));
//! assert_eq!(messages[0].body, "Hey!\nhow are you?");
//! ```

pub mod attachment;
pub mod datetime;
pub mod disambiguate;
mod error;
pub mod matcher;
pub mod models;
pub mod parser;
pub mod summary;

pub use crate::error::{ParseError, Result};
pub use crate::models::{Attachment, Message, ParseStringOptions, RawMessage};
pub use crate::summary::{date_range, unique_authors};

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use tracing::debug;

use crate::parser::{make_array_of_messages, parse_messages, split_lines};

/// Parses the full text of a chat export.
///
/// Never fails: lines that cannot be read as a message are merged into the
/// previous one, or dropped when there is none.
pub fn parse_string(s: &str, options: Option<ParseStringOptions>) -> Vec<Message> {
    let opts = options.unwrap_or_default();
    let lines = split_lines(s);
    debug!(chars = s.len(), lines = lines.len(), ?opts, "parse_string called");

    parse_messages(&make_array_of_messages(&lines), &opts)
}

/// Convenience helper that memory-maps a chat export file and parses it without
/// copying its contents into an intermediate `String`.
pub fn parse_file<P: AsRef<Path>>(
    path: P,
    options: Option<ParseStringOptions>,
) -> Result<Vec<Message>> {
    let file = File::open(path.as_ref())?;
    if file.metadata()?.len() == 0 {
        return Ok(Vec::new());
    }

    // SAFETY: the map is read-only and dropped before returning; the export
    // must not be truncated by another process while it is parsed.
    let mmap = unsafe { Mmap::map(&file)? };
    let text = std::str::from_utf8(&mmap)?;
    Ok(parse_string(text, options))
}
