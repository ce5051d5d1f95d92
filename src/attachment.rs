use lazy_static::lazy_static;
use regex::Regex;

use crate::models::Attachment;

lazy_static! {
    // `<attached: name>` or `name.ext (label)` / `name.ext <label>` anywhere in the body,
    // the label in any language
    static ref REGEX_ATTACHMENT: Regex =
        Regex::new(r"(?:\x{200E}|\x{200F})*(?:<.+:(.+)>|([\w-]+\.\w+)\s[(<].+[)>])").unwrap();
}

/// Parses a message body extracting the attachment if it's present.
pub fn parse_message_attachment(body: &str) -> Option<Attachment> {
    let caps = REGEX_ATTACHMENT.captures(body)?;
    let file_name = caps.get(1).or_else(|| caps.get(2))?.as_str().trim();

    Some(Attachment {
        file_name: file_name.to_string(),
    })
}
