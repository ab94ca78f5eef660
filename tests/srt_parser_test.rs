use std::time::Duration;

use subtitle_convert::{SrtParser, SubtitleDocument, SubtitleEntry, SubtitleFormat, SubtitleParser};
use subtitle_convert::subtitle::time::{format_srt_time, parse_time};

const SAMPLE: &str = "1
00:00:01,000 --> 00:00:03,000
Hello, world!

2
00:00:04,000 --> 00:00:06,000
This is a subtitle test.

3
00:00:07,000 --> 00:00:09,500
Multiple
lines
";

#[test]
fn test_parse_sample() {
    let doc = SrtParser.parse(SAMPLE);

    assert_eq!(doc.format, SubtitleFormat::Srt);
    assert_eq!(doc.len(), 3);

    assert_eq!(doc[0].index, 1);
    assert_eq!(doc[0].start, Duration::from_secs(1));
    assert_eq!(doc[0].end, Duration::from_secs(3));
    assert_eq!(doc[0].text, "Hello, world!");

    assert_eq!(doc[2].end, Duration::from_millis(9_500));
    assert_eq!(doc[2].text, "Multiple\nlines");
    assert!(doc.is_valid());
}

#[test]
fn test_parse_tolerates_extra_blank_lines() {
    let content = "\n\n1\n00:00:01,000 --> 00:00:02,000\nA\n\n\n\n2\n00:00:03,000 --> 00:00:04,000\nB\n\n\n";
    let doc = SrtParser.parse(content);

    assert_eq!(doc.len(), 2);
    assert_eq!(doc[1].text, "B");
}

#[test]
fn test_parse_empty_content() {
    let doc = SrtParser.parse("");
    assert!(doc.is_empty());
    assert!(!doc.is_valid());
}

#[test]
fn test_parse_checked_rejects_other_formats() {
    let result = SrtParser.parse_checked("WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHi");
    assert!(result.is_err());
}

#[test]
fn test_generate_renumbers_by_time() {
    let mut doc = SubtitleDocument::new(SubtitleFormat::Srt);
    doc.add_entry(SubtitleEntry::new(10, Duration::from_secs(5), Duration::from_secs(6), "Second"));
    doc.add_entry(SubtitleEntry::new(20, Duration::from_secs(1), Duration::from_secs(2), "First"));

    let out = SrtParser.generate(&doc);
    assert_eq!(
        out,
        "1\n00:00:01,000 --> 00:00:02,000\nFirst\n\n2\n00:00:05,000 --> 00:00:06,000\nSecond"
    );
}

#[test]
fn test_generate_empty_document() {
    let doc = SubtitleDocument::new(SubtitleFormat::Srt);
    assert_eq!(SrtParser.generate(&doc), "");
}

#[test]
fn test_round_trip() {
    let doc = SrtParser.parse(SAMPLE);
    let again = SrtParser.parse(&SrtParser.generate(&doc));

    assert_eq!(doc, again);
}

#[test]
fn test_time_literals() -> subtitle_convert::Result<()> {
    let time = parse_time(SubtitleFormat::Srt, "01:23:45,678")?;
    assert_eq!(time, Duration::from_millis(5_025_678));
    assert_eq!(format_srt_time(time), "01:23:45,678");

    // Часы не ограничены сутками
    assert_eq!(format_srt_time(Duration::from_secs(100 * 3600)), "100:00:00,000");
    assert!(parse_time(SubtitleFormat::Srt, "00:00:01.000").is_err());

    Ok(())
}
