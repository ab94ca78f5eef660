use regex::Captures;
use std::time::Duration;

use crate::logging::log_trace;
use crate::subtitle::models::{SubtitleDocument, SubtitleEntry, SubtitleFormat};
use crate::subtitle::parser::{significant_lines, starts_with_ignore_case, strip_bom, SubtitleParser};
use crate::subtitle::patterns::VTT_TIME_RANGE;
use crate::subtitle::time::{format_vtt_time, parse_vtt_time};

const HEADER: &str = "WEBVTT";

/// Парсер WebVTT
#[derive(Debug, Clone, Copy, Default)]
pub struct VttParser;

impl VttParser {
    fn has_header(line: &str) -> bool {
        starts_with_ignore_case(line, HEADER)
    }

    /// Текст после `WEBVTT` в первой строке, например `WEBVTT - Title`
    fn header_title(first_line: &str) -> Option<String> {
        if !Self::has_header(first_line) {
            return None;
        }
        let rest = &first_line[HEADER.len()..];
        if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let title = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '-');
        let title = title.trim();
        (!title.is_empty()).then(|| title.to_string())
    }

    /// Время начала и окончания из совпадения диапазона
    fn cue_times(captures: &Captures) -> Option<(Duration, Duration)> {
        let group = |i: usize| captures.get(i).map_or("", |m| m.as_str());
        let start = parse_vtt_time(group(1), group(2), group(3), group(4)).ok()?;
        let end = parse_vtt_time(group(5), group(6), group(7), group(8)).ok()?;
        Some((start, end))
    }
}

impl SubtitleParser for VttParser {
    fn format(&self) -> SubtitleFormat {
        SubtitleFormat::Vtt
    }

    fn detect(&self, content: &str) -> bool {
        let lines = significant_lines(content);
        lines.len() >= 2
            && Self::has_header(lines[0])
            && lines.iter().any(|line| VTT_TIME_RANGE.is_match(line))
    }

    fn parse(&self, content: &str) -> SubtitleDocument {
        let lines: Vec<&str> = strip_bom(content).split('\n').map(str::trim).collect();

        let mut document = SubtitleDocument::new(SubtitleFormat::Vtt);
        document.title = lines.first().and_then(|line| Self::header_title(line));

        let mut index = 1;
        let mut i = 0;
        while i < lines.len() {
            let Some(captures) = VTT_TIME_RANGE.captures(lines[i]) else {
                i += 1;
                continue;
            };
            i += 1;

            // Текст cue - непустые строки до пустой строки или следующего времени
            let mut text_lines = Vec::new();
            while i < lines.len() && !lines[i].is_empty() && !VTT_TIME_RANGE.is_match(lines[i]) {
                text_lines.push(lines[i]);
                i += 1;
            }

            match Self::cue_times(&captures) {
                Some((start, end)) if !text_lines.is_empty() => {
                    document.add_entry(SubtitleEntry::new(index, start, end, text_lines.join("\n")));
                    index += 1;
                }
                _ => log_trace(&format!("Пропущен cue VTT без текста или с неверным временем: {}", &captures[0])),
            }
        }

        document
    }

    fn generate(&self, document: &SubtitleDocument) -> String {
        let cues = document
            .entries_by_time()
            .iter()
            .map(|entry| {
                format!(
                    "{} --> {}\n{}",
                    format_vtt_time(entry.start),
                    format_vtt_time(entry.end),
                    entry.text
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        format!("{}\n\n{}", HEADER, cues)
    }
}
