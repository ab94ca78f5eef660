use std::time::Duration;

use subtitle_convert::{SubtitleDocument, SubtitleEntry, SubtitleFormat, SubtitleParser, VttParser};

#[test]
fn test_parse_empty_content() {
    let doc = VttParser.parse("");
    assert_eq!(doc.len(), 0);
    assert!(!VttParser.detect(""));
}

#[test]
fn test_parse_valid_vtt() {
    let vtt_content = r#"WEBVTT

00:00:01.000 --> 00:00:05.000
Hello, world!

00:00:06.000 --> 00:00:10.000
This is a test.
"#;

    let doc = VttParser.parse(vtt_content);
    assert_eq!(doc.len(), 2);

    let first = &doc[0];
    assert_eq!(first.index, 1);
    assert_eq!(first.start, Duration::from_secs(1));
    assert_eq!(first.end, Duration::from_secs(5));
    assert_eq!(first.text, "Hello, world!");

    let second = &doc[1];
    assert_eq!(second.index, 2);
    assert_eq!(second.start, Duration::from_secs(6));
    assert_eq!(second.end, Duration::from_secs(10));
    assert_eq!(second.text, "This is a test.");
}

#[test]
fn test_parse_vtt_with_metadata() {
    // Заголовок с названием, NOTE-блоки и идентификаторы cue
    let vtt_content = r#"WEBVTT - Some title

NOTE
This is a comment and should be ignored.

intro
00:00:01.000 --> 00:00:05.000 align:start position:10%
Hello, world!

NOTE Another comment

00:06.000 --> 00:10.250
This is a test.
"#;

    let doc = VttParser.parse(vtt_content);
    assert_eq!(doc.title.as_deref(), Some("Some title"));
    assert_eq!(doc.len(), 2);
    assert_eq!(doc[0].text, "Hello, world!");
    assert_eq!(doc[1].start, Duration::from_secs(6));
    assert_eq!(doc[1].end, Duration::from_millis(10_250));
}

#[test]
fn test_parse_multiline_cue() {
    let doc = VttParser.parse("WEBVTT\r\n\r\n00:00:01.000 --> 00:00:02.000\r\nLine one\r\nLine two\r\n");
    assert_eq!(doc.len(), 1);
    assert_eq!(doc[0].text, "Line one\nLine two");
}

#[test]
fn test_generate() {
    let mut doc = SubtitleDocument::new(SubtitleFormat::Vtt);
    doc.add_entry(SubtitleEntry::new(1, Duration::from_millis(1_500), Duration::from_secs(3), "Hi"));

    assert_eq!(VttParser.generate(&doc), "WEBVTT\n\n00:00:01.500 --> 00:00:03.000\nHi");
    assert_eq!(VttParser.generate(&SubtitleDocument::new(SubtitleFormat::Vtt)), "WEBVTT\n\n");
}

#[test]
fn test_round_trip() {
    let original = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nA\n\n00:00:03.000 --> 00:00:04.000\nB\nC";
    let doc = VttParser.parse(original);
    let generated = VttParser.generate(&doc);

    assert_eq!(generated, original);
    assert_eq!(VttParser.parse(&generated), doc);
}
