use std::fmt::Write as _;

use crate::logging::log_trace;
use crate::subtitle::models::{SubtitleDocument, SubtitleEntry, SubtitleFormat};
use crate::subtitle::parser::{significant_lines, starts_with_ignore_case, strip_bom, SubtitleParser};
use crate::subtitle::patterns::{ASS_DIALOGUE, ASS_OVERRIDE_TAG, ASS_STYLE, ASS_TIME, ASS_TITLE};
use crate::subtitle::time::{format_ass_time, parse_ass_time};

/// Заголовки секций, по которым распознаётся ASS/SSA
const SECTION_HEADERS: [&str; 4] = ["[Script Info]", "[V4+ Styles]", "[V4 Styles]", "[Events]"];

const DIALOGUE_PREFIX: &str = "Dialogue:";
const DEFAULT_TITLE: &str = "Converted Subtitle";
const STYLE_FORMAT: &str = "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding";
const DEFAULT_STYLE: &str = "Style: Default,Arial,20,&H00FFFFFF,&H000000FF,&H00000000,&H80000000,0,0,0,0,100,100,0,0,1,2,0,2,10,10,10,1";
const EVENTS_FORMAT: &str = "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

/// Секция скрипта, в которой находится текущая строка
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    ScriptInfo,
    Styles,
    Events,
    Other,
}

impl Section {
    fn from_header(line: &str) -> Self {
        match line.to_ascii_lowercase().as_str() {
            "[script info]" => Self::ScriptInfo,
            "[v4+ styles]" | "[v4 styles]" => Self::Styles,
            "[events]" => Self::Events,
            _ => Self::Other,
        }
    }
}

/// Парсер Advanced SSA (ASS), также принимает SSA v4
#[derive(Debug, Clone, Copy, Default)]
pub struct AssParser;

impl AssParser {
    /// Удаляет теги `{...}` и переводит служебные переносы ASS в обычный текст
    pub fn clean_text(text: &str) -> String {
        ASS_OVERRIDE_TAG
            .replace_all(text, "")
            .replace("\\N", "\n")
            .replace("\\n", "\n")
            .replace("\\h", " ")
    }

    fn parse_dialogue(line: &str, index: usize) -> Option<SubtitleEntry> {
        let captures = ASS_DIALOGUE.captures(line)?;
        let start = ASS_TIME.captures(&captures[1])?;
        let end = ASS_TIME.captures(&captures[2])?;

        let start = parse_ass_time(&start[1], &start[2], &start[3], &start[4]).ok()?;
        let end = parse_ass_time(&end[1], &end[2], &end[3], &end[4]).ok()?;

        let mut entry = SubtitleEntry::new(index, start, end, Self::clean_text(&captures[9]));
        let style = captures[3].trim();
        if !style.is_empty() {
            entry = entry.with_style(style);
        }
        Some(entry)
    }
}

impl SubtitleParser for AssParser {
    fn format(&self) -> SubtitleFormat {
        SubtitleFormat::Ass
    }

    fn detect(&self, content: &str) -> bool {
        let lines = significant_lines(content);
        if lines.len() < 2 {
            return false;
        }

        let has_header = lines.iter().any(|line| {
            SECTION_HEADERS
                .iter()
                .any(|header| starts_with_ignore_case(line, header))
        });
        let has_dialogue = lines
            .iter()
            .any(|line| starts_with_ignore_case(line, DIALOGUE_PREFIX));

        has_header && has_dialogue
    }

    fn parse(&self, content: &str) -> SubtitleDocument {
        let mut document = SubtitleDocument::new(SubtitleFormat::Ass);
        let mut section = Section::None;
        let mut index = 1;

        for line in strip_bom(content).split('\n').map(str::trim) {
            if line.starts_with('[') && line.ends_with(']') {
                section = Section::from_header(line);
                continue;
            }

            if starts_with_ignore_case(line, DIALOGUE_PREFIX) {
                match Self::parse_dialogue(line, index) {
                    Some(entry) => {
                        document.add_entry(entry);
                        index += 1;
                    }
                    None => log_trace(&format!("Пропущена некорректная строка Dialogue: {:?}", line)),
                }
                continue;
            }

            match section {
                Section::ScriptInfo if document.title.is_none() => {
                    if let Some(c) = ASS_TITLE.captures(line) {
                        let title = c[1].trim();
                        if !title.is_empty() {
                            document.title = Some(title.to_string());
                        }
                    }
                }
                Section::Styles => {
                    if let Some(c) = ASS_STYLE.captures(line) {
                        let name = c[1].trim().to_string();
                        let definition = format!("{},{}", name, c[2].trim());
                        document.styles.insert(name, definition);
                    }
                }
                _ => {}
            }
        }

        document
    }

    fn generate(&self, document: &SubtitleDocument) -> String {
        let mut out = String::new();
        let title = document.title.as_deref().unwrap_or(DEFAULT_TITLE);

        // Запись в String не может завершиться ошибкой
        let _ = writeln!(out, "[Script Info]");
        let _ = writeln!(out, "Title: {}", title);
        let _ = writeln!(out, "ScriptType: v4.00+");
        let _ = writeln!(out);

        let _ = writeln!(out, "[V4+ Styles]");
        let _ = writeln!(out, "{}", STYLE_FORMAT);
        let _ = writeln!(out, "{}", DEFAULT_STYLE);
        let _ = writeln!(out);

        let _ = writeln!(out, "[Events]");
        let _ = writeln!(out, "{}", EVENTS_FORMAT);

        for entry in document.entries_by_time() {
            let text = entry.text.replace("\r\n", "\n").replace('\n', "\\N");
            let _ = writeln!(
                out,
                "Dialogue: 0,{},{},Default,,0,0,0,,{}",
                format_ass_time(entry.start),
                format_ass_time(entry.end),
                text
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const SAMPLE: &str = "[Script Info]\n\
Title: Demo\n\
ScriptType: v4.00+\n\
\n\
[V4+ Styles]\n\
Format: Name, Fontname, Fontsize\n\
Style: Default,Arial,20\n\
Style: Sign,Verdana,14\n\
\n\
[Events]\n\
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n\
Dialogue: 0,0:00:01.00,0:00:03.50,Default,,0,0,0,,{\\b1}Hello{\\b0}, world\n\
Dialogue: 0,0:00:04.00,0:00:06.00,Sign,,0,0,0,,Line one\\NLine two\n";

    #[test]
    fn test_detect() {
        assert!(AssParser.detect(SAMPLE));
        assert!(!AssParser.detect("[Script Info]\nTitle: no events"));
        assert!(!AssParser.detect("Dialogue: 0,0:00:01.00,0:00:03.00,Default,,0,0,0,,Hi\nno header"));
    }

    #[test]
    fn test_parse() {
        let doc = AssParser.parse(SAMPLE);

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.title.as_deref(), Some("Demo"));
        assert_eq!(doc.styles.len(), 2);
        assert_eq!(doc.styles["Sign"], "Sign,Verdana,14");

        assert_eq!(doc[0].index, 1);
        assert_eq!(doc[0].start, Duration::from_secs(1));
        assert_eq!(doc[0].end, Duration::from_millis(3_500));
        assert_eq!(doc[0].text, "Hello, world");
        assert_eq!(doc[0].style.as_deref(), Some("Default"));

        assert_eq!(doc[1].text, "Line one\nLine two");
        assert_eq!(doc[1].style.as_deref(), Some("Sign"));
    }

    #[test]
    fn test_parse_skips_malformed_dialogue() {
        let content = "[Events]\n\
Dialogue: 0,bad,0:00:03.00,Default,,0,0,0,,Broken\n\
Dialogue: 0,0:00:01.00,0:00:03.00,Default\n\
Dialogue: 0,0:00:05.00,0:00:06.00,Default,,0,0,0,,Fine";
        let doc = AssParser.parse(content);
        assert_eq!(doc.len(), 1);
        assert_eq!(doc[0].index, 1);
        assert_eq!(doc[0].text, "Fine");
    }

    #[test]
    fn test_nested_tags_are_not_supported() {
        // Вложенная скобка закрывает тег раньше времени
        assert_eq!(AssParser::clean_text("{\\t({\\b1})}x"), ")}x");
    }

    #[test]
    fn test_generate() {
        let mut doc = SubtitleDocument::new(SubtitleFormat::Ass);
        doc.add_entry(SubtitleEntry::new(1, Duration::from_secs(4), Duration::from_secs(5), "Second"));
        doc.add_entry(SubtitleEntry::new(2, Duration::from_millis(1_230), Duration::from_secs(2), "First\nline"));

        let out = AssParser.generate(&doc);

        assert!(out.starts_with("[Script Info]\nTitle: Converted Subtitle\nScriptType: v4.00+\n"));
        assert!(out.contains("[V4+ Styles]\n"));
        assert!(out.contains(DEFAULT_STYLE));
        let dialogues: Vec<&str> = out.lines().filter(|l| l.starts_with("Dialogue:")).collect();
        assert_eq!(
            dialogues,
            vec![
                "Dialogue: 0,0:00:01.23,0:00:02.00,Default,,0,0,0,,First\\Nline",
                "Dialogue: 0,0:00:04.00,0:00:05.00,Default,,0,0,0,,Second",
            ]
        );
    }
}
