use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One logical message as recovered from the physical lines of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    pub system: bool,
    /// The first physical line followed by every continuation line, joined
    /// with `\n`.
    pub msg: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// The filename of the attachment, including the extension.
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent. Taken as UTC, no timezone is inferred.
    pub timestamp: DateTime<Utc>,
    /// The author of the message. Will be `None` for system messages.
    pub author: Option<String>,
    /// The message text, internal newlines preserved.
    pub body: String,
    /// Available for messages containing attachments when setting the option
    /// `parse_attachments` to `true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

impl Message {
    /// Returns `true` for messages without an author.
    pub fn is_system(&self) -> bool {
        self.author.is_none()
    }
}

/// Options controlling a single parse.
///
/// Loads from JSON with camelCase keys, missing keys fall back to defaults:
///
/// ```rust
/// use chatlog_parser::ParseStringOptions;
///
/// let options = ParseStringOptions::from_json(r#"{"daysFirst": false}"#)?;
/// assert_eq!(options.days_first, Some(false));
/// assert!(!options.parse_attachments);
/// # Ok::<(), chatlog_parser::ParseError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseStringOptions {
    /// Specify if the dates in your log file start with a day (`true`) or a
    /// month (`false`).
    ///
    /// When set, the order is not inferred from the data at all.
    pub days_first: Option<bool>,
    /// Specify if attachments should be parsed.
    ///
    /// If set to `true`, messages containing attachments will include an
    /// `attachment` property.
    pub parse_attachments: bool,
}

impl ParseStringOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the day/month order instead of inferring it.
    #[must_use]
    pub fn with_days_first(mut self, days_first: bool) -> Self {
        self.days_first = Some(days_first);
        self
    }

    /// Enables or disables attachment extraction.
    #[must_use]
    pub fn with_attachments(mut self, enabled: bool) -> Self {
        self.parse_attachments = enabled;
        self
    }

    /// Loads options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_json() {
        let options =
            ParseStringOptions::from_json(r#"{"daysFirst": true, "parseAttachments": true}"#)
                .unwrap();
        assert_eq!(options, ParseStringOptions::new().with_days_first(true).with_attachments(true));
    }

    #[test]
    fn test_options_from_partial_json() {
        assert_eq!(ParseStringOptions::from_json("{}").unwrap(), ParseStringOptions::default());
        assert_eq!(
            ParseStringOptions::from_json(r#"{"daysFirst": null}"#).unwrap().days_first,
            None
        );
    }

    #[test]
    fn test_options_from_invalid_json() {
        assert!(ParseStringOptions::from_json(r#"{"daysFirst": "yes"}"#).is_err());
        assert!(ParseStringOptions::from_json("not json").is_err());
    }

    #[test]
    fn test_message_serializes_without_empty_attachment() {
        let message = Message {
            timestamp: DateTime::<Utc>::default(),
            author: None,
            body: "joined".to_string(),
            attachment: None,
        };
        let json = serde_json::to_value(&message).unwrap();

        assert!(message.is_system());
        assert!(json.get("attachment").is_none());
        assert_eq!(json["author"], serde_json::Value::Null);
    }
}
