use std::io::Write;

use chatlog_parser::{ParseStringOptions, date_range, parse_file, parse_string, unique_authors};
use chrono::offset::TimeZone;
use chrono::Utc;

const CHAT_EXAMPLE: &str = r#"06/03/2017, 00:45 - Messages to this group are now secured with end-to-end encryption. Tap for more info.
06/03/2017, 00:45 - You created group "ShortChat"
06/03/2017, 00:45 - Sample User: This is a test message
08/05/2017, 01:48 - TestBot: Hey I'm a test too!
09/04/2017, 01:50 - +410123456789: How are you?
Is everything alright?"#;

#[test]
fn test_parse_string_empty() {
    assert_eq!(parse_string("", None).len(), 0);
}

#[test]
fn test_parse_string_count() {
    let messages = parse_string(CHAT_EXAMPLE, None);
    assert_eq!(messages.len(), 5);
}

#[test]
fn test_parse_string_multiline() {
    let messages = parse_string(CHAT_EXAMPLE, None);
    assert_eq!(messages[4].body, "How are you?\nIs everything alright?");
}

#[test]
fn test_parse_string_infers_month_first() {
    let messages = parse_string(CHAT_EXAMPLE, None);
    let (first, last) = date_range(&messages).unwrap();

    assert_eq!(first, Utc.with_ymd_and_hms(2017, 6, 3, 0, 45, 0).unwrap());
    assert_eq!(last, Utc.with_ymd_and_hms(2017, 9, 4, 1, 50, 0).unwrap());
}

#[test]
fn test_authors() {
    let messages = parse_string(CHAT_EXAMPLE, None);

    assert!(messages[0].is_system());
    assert!(messages[1].is_system());
    assert_eq!(
        unique_authors(&messages),
        vec!["Sample User", "TestBot", "+410123456789"]
    );
}

#[test]
fn test_issue_237() {
    let messages = parse_string("30/12/2020 13:00 - a: m\n13/1/2021 13:00 - a: m", None);
    assert_eq!(
        messages[0].timestamp,
        Utc.with_ymd_and_hms(2020, 12, 30, 13, 0, 0).unwrap()
    );
    assert_eq!(
        messages[1].timestamp,
        Utc.with_ymd_and_hms(2021, 1, 13, 13, 0, 0).unwrap()
    );
}

#[test]
fn test_single_line_formats() {
    let formats = [
        "3/6/18, 1:55 p.m. - a: m",
        "03-06-2018, 01.55 PM - a: m",
        "13.06.18 21.25.15: a: m",
        "[06.13.18 21:25:15] a: m",
        "[2018/06/13, 21:25:15] a: m",
    ];

    for format in formats {
        let messages = parse_string(format, None);
        assert_eq!(messages.len(), 1, "{format}");
        assert_eq!(messages[0].author.as_deref(), Some("a"), "{format}");
        assert_eq!(messages[0].body, "m", "{format}");
    }
}

#[test]
fn test_multiline_with_blank_line() {
    let messages = parse_string(
        "09/04/2017, 01:50 - +410123456789: How are you?\n\nIs everything alright?",
        None,
    );

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].body, "How are you?\n\nIs everything alright?");
}

#[test]
fn test_mixed_line_endings() {
    let messages = parse_string("1/2/20, 10:00 - a: one\r\ntwo\r3/2/20, 11:00 - b: three\n", None);

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].body, "one\ntwo");
    assert_eq!(messages[1].body, "three");
}

#[test]
fn test_attachment() {
    let options = ParseStringOptions::new().with_attachments(true);
    let messages = parse_string(
        "3/6/18, 1:55 p.m. - a: IMG-20210428-WA0001.jpg (file attached)",
        Some(options),
    );

    assert_eq!(
        messages[0].attachment.as_ref().unwrap().file_name,
        "IMG-20210428-WA0001.jpg"
    );
}

#[test]
fn test_attachment_inside_body() {
    let options = ParseStringOptions::new().with_attachments(true);
    let messages = parse_string(
        "3/6/18, 1:55 p.m. - a: here you go IMG-20210428-WA0001.jpg (file attached)\n\
         3/6/18, 1:56 p.m. - a: caption\n<attached: photo.jpg>",
        Some(options),
    );

    assert_eq!(messages.len(), 2);
    assert_eq!(
        messages[0].attachment.as_ref().unwrap().file_name,
        "IMG-20210428-WA0001.jpg"
    );
    assert_eq!(messages[1].body, "caption\n<attached: photo.jpg>");
    assert_eq!(messages[1].attachment.as_ref().unwrap().file_name, "photo.jpg");
}

#[test]
fn test_encryption_notice_with_author_is_anonymized() {
    let messages = parse_string(
        "1/2/20, 10:00 - WhatsApp: Messages are end-to-end encrypted\n1/2/20, 10:01 - a: hi",
        None,
    );

    assert_eq!(messages[0].author, None);
    assert_eq!(messages[1].author.as_deref(), Some("a"));
}

#[test]
fn test_iphone_system_notice_flagged_by_mark() {
    let messages = parse_string(
        "[29/11/18, 10:50:12] Group: \u{200E}Andrew added Josh\n\u{200E}[29/11/18, 10:51:00] Josh: \u{200E}image omitted",
        None,
    );

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].author, None);
    assert_eq!(messages[0].body, "Group: \u{200E}Andrew added Josh");
    assert_eq!(messages[1].author.as_deref(), Some("Josh"));
}

#[test]
fn test_parse_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CHAT_EXAMPLE.as_bytes()).unwrap();

    let messages = parse_file(file.path(), None).unwrap();
    assert_eq!(messages, parse_string(CHAT_EXAMPLE, None));
}

#[test]
fn test_parse_file_empty() {
    let file = tempfile::NamedTempFile::new().unwrap();
    assert!(parse_file(file.path(), None).unwrap().is_empty());
}

#[test]
fn test_parse_file_errors() {
    assert!(parse_file("/definitely/not/here.txt", None).is_err());

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[0xff, 0xfe, 0x00]).unwrap();
    assert!(parse_file(file.path(), None).is_err());
}
