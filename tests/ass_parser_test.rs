use std::time::Duration;

use subtitle_convert::{AssParser, SubtitleDocument, SubtitleEntry, SubtitleFormat, SubtitleParser};

const SAMPLE: &str = "[Script Info]
Title: Episode 1
ScriptType: v4.00+

[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
Style: Default,Arial,20,&H00FFFFFF,&H000000FF,&H00000000,&H80000000,0,0,0,0,100,100,0,0,1,2,0,2,10,10,10,1
Style: Sign,Verdana,18,&H00FFFFFF,&H000000FF,&H00000000,&H80000000,0,0,0,0,100,100,0,0,1,2,0,8,10,10,10,1

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
Dialogue: 0,0:00:01.00,0:00:03.50,Default,,0,0,0,,{\\i1}Hello{\\i0}, world
Comment: 0,0:00:02.00,0:00:03.00,Default,,0,0,0,,not shown
Dialogue: 0,0:00:04.00,0:00:06.00,Sign,,0,0,0,,Top\\Nbottom\\hend
";

#[test]
fn test_detect() {
    assert!(AssParser.detect(SAMPLE));
    assert!(!AssParser.detect("[Script Info]\nTitle: nothing"));
    assert!(!AssParser.detect("1\n00:00:01,000 --> 00:00:02,000\nHi"));
}

#[test]
fn test_parse_sample() {
    let doc = AssParser.parse(SAMPLE);

    assert_eq!(doc.format, SubtitleFormat::Ass);
    assert_eq!(doc.title.as_deref(), Some("Episode 1"));
    assert_eq!(doc.styles.len(), 2);
    assert!(doc.styles["Sign"].starts_with("Sign,Verdana,18"));

    assert_eq!(doc.len(), 2);
    assert_eq!(doc[0].index, 1);
    assert_eq!(doc[0].start, Duration::from_secs(1));
    assert_eq!(doc[0].end, Duration::from_millis(3_500));
    assert_eq!(doc[0].text, "Hello, world");
    assert_eq!(doc[0].style.as_deref(), Some("Default"));

    assert_eq!(doc[1].index, 2);
    assert_eq!(doc[1].text, "Top\nbottom end");
    assert_eq!(doc[1].style.as_deref(), Some("Sign"));
}

#[test]
fn test_text_may_contain_commas() {
    let content = "[Events]\nDialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,One, two, three";
    let doc = AssParser.parse(content);
    assert_eq!(doc[0].text, "One, two, three");
}

#[test]
fn test_generate() {
    let mut doc = SubtitleDocument::new(SubtitleFormat::Ass);
    doc.add_entry(SubtitleEntry::new(1, Duration::from_millis(1_230), Duration::from_millis(4_560), "A\nB"));

    let out = AssParser.generate(&doc);

    assert!(out.starts_with("[Script Info]\nTitle: Converted Subtitle\nScriptType: v4.00+\n"));
    assert!(out.contains("[V4+ Styles]\n"));
    assert!(out.contains("\n[Events]\nFormat: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n"));
    assert!(out.ends_with("Dialogue: 0,0:00:01.23,0:00:04.56,Default,,0,0,0,,A\\NB\n"));
}

#[test]
fn test_generate_keeps_title() {
    let doc = AssParser.parse(SAMPLE);
    assert!(AssParser.generate(&doc).contains("Title: Episode 1\n"));
}

#[test]
fn test_round_trip_plain_text() {
    let doc = AssParser.parse(SAMPLE);
    let again = AssParser.parse(&AssParser.generate(&doc));

    assert_eq!(again.len(), doc.len());
    for (a, b) in doc.iter().zip(again.iter()) {
        assert_eq!(a.start, b.start);
        assert_eq!(a.end, b.end);
        assert_eq!(a.text, b.text);
    }
}
