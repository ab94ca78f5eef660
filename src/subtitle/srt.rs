use crate::logging::log_trace;
use crate::subtitle::models::{SubtitleDocument, SubtitleEntry, SubtitleFormat};
use crate::subtitle::parser::{significant_lines, strip_bom, SubtitleParser};
use crate::subtitle::patterns::{SRT_BLOCK_SEPARATOR, SRT_INDEX, SRT_TIME_RANGE};
use crate::subtitle::time::{format_srt_time, parse_srt_time};

/// Парсер SubRip (SRT)
#[derive(Debug, Clone, Copy, Default)]
pub struct SrtParser;

impl SrtParser {
    /// Разбирает один блок; `None`, если блок некорректен
    fn parse_block(block: &str) -> Option<SubtitleEntry> {
        let lines: Vec<&str> = block.split('\n').map(str::trim).collect();
        if lines.len() < 3 {
            return None;
        }

        let index: usize = lines[0].parse().ok()?;
        let captures = SRT_TIME_RANGE.captures(lines[1])?;
        let start = parse_srt_time(&captures[1], &captures[2], &captures[3], &captures[4]).ok()?;
        let end = parse_srt_time(&captures[5], &captures[6], &captures[7], &captures[8]).ok()?;

        Some(SubtitleEntry::new(index, start, end, lines[2..].join("\n")))
    }
}

impl SubtitleParser for SrtParser {
    fn format(&self) -> SubtitleFormat {
        SubtitleFormat::Srt
    }

    fn detect(&self, content: &str) -> bool {
        let lines = significant_lines(content);
        lines.len() >= 3 && SRT_INDEX.is_match(lines[0]) && SRT_TIME_RANGE.is_match(lines[1])
    }

    fn parse(&self, content: &str) -> SubtitleDocument {
        let mut document = SubtitleDocument::new(SubtitleFormat::Srt);

        for block in SRT_BLOCK_SEPARATOR.split(strip_bom(content)) {
            let block = block.trim();
            if block.is_empty() {
                continue;
            }
            match Self::parse_block(block) {
                Some(entry) => document.add_entry(entry),
                None => log_trace(&format!("Пропущен некорректный блок SRT: {:?}", block)),
            }
        }

        document
    }

    /// Номера записей назначаются заново по позиции в выводе
    fn generate(&self, document: &SubtitleDocument) -> String {
        document
            .entries_by_time()
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                format!(
                    "{}\n{} --> {}\n{}",
                    i + 1,
                    format_srt_time(entry.start),
                    format_srt_time(entry.end),
                    entry.text
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
