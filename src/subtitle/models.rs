use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::Error;

/// Поддерживаемые форматы субтитров
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum SubtitleFormat {
    /// Формат не определён
    #[default]
    Unknown,
    /// SubRip
    Srt,
    /// WebVTT
    Vtt,
    /// Advanced SSA
    Ass,
}

impl SubtitleFormat {
    /// Все конкретные форматы в порядке перебора при определении формата
    pub const ALL: [SubtitleFormat; 3] = [Self::Srt, Self::Vtt, Self::Ass];

    /// Расширение файла с точкой
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Srt => ".srt",
            Self::Vtt => ".vtt",
            Self::Ass => ".ass",
            Self::Unknown => "",
        }
    }

    /// Человекочитаемое название формата
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Srt => "SRT (SubRip)",
            Self::Vtt => "VTT (WebVTT)",
            Self::Ass => "ASS (Advanced SSA)",
            Self::Unknown => "Unknown Format",
        }
    }

    /// Определяет формат по расширению файла (с точкой или без)
    pub fn from_extension(extension: &str) -> Self {
        match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "srt" => Self::Srt,
            "vtt" => Self::Vtt,
            "ass" | "ssa" => Self::Ass,
            _ => Self::Unknown,
        }
    }

    /// Определяет формат по расширению пути
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unknown)
    }

    pub fn is_known(&self) -> bool {
        *self != Self::Unknown
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for SubtitleFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "srt" | "subrip" => Ok(Self::Srt),
            "vtt" | "webvtt" => Ok(Self::Vtt),
            "ass" | "ssa" => Ok(Self::Ass),
            _ => Err(Error::InvalidParameters(format!("Unknown subtitle format: {}", s))),
        }
    }
}

/// Одна запись субтитров
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    /// Порядковый номер (с 1)
    pub index: usize,
    /// Время начала
    pub start: Duration,
    /// Время окончания
    pub end: Duration,
    /// Текст, может содержать переводы строк
    pub text: String,
    /// Имя стиля (только ASS)
    pub style: Option<String>,
}

impl SubtitleEntry {
    /// Создает новую запись без стиля
    pub fn new(index: usize, start: Duration, end: Duration, text: impl Into<String>) -> Self {
        Self {
            index,
            start,
            end,
            text: text.into(),
            style: None,
        }
    }

    /// Устанавливает стиль записи
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Длительность записи; для перевёрнутого интервала нулевая
    pub fn duration(&self) -> Duration {
        self.end.saturating_sub(self.start)
    }

    /// Проверяет, что начало не позже окончания
    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} --> {}: {}",
            self.index,
            super::time::format_vtt_time(self.start),
            super::time::format_vtt_time(self.end),
            self.text
        )
    }
}

/// Документ субтитров: записи и сведения о файле
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleDocument {
    /// Путь к исходному файлу, если документ прочитан с диска
    pub file_path: Option<PathBuf>,
    /// Формат документа
    pub format: SubtitleFormat,
    /// Записи в порядке разбора
    pub entries: Vec<SubtitleEntry>,
    /// Заголовок
    pub title: Option<String>,
    /// Определения стилей ASS: имя -> строка определения
    pub styles: BTreeMap<String, String>,
    /// Кодировка (информационно)
    pub encoding: String,
}

impl Default for SubtitleDocument {
    fn default() -> Self {
        Self::new(SubtitleFormat::Unknown)
    }
}

impl SubtitleDocument {
    pub const DEFAULT_ENCODING: &'static str = "UTF-8";

    /// Создает пустой документ указанного формата
    pub fn new(format: SubtitleFormat) -> Self {
        Self {
            file_path: None,
            format,
            entries: Vec::new(),
            title: None,
            styles: BTreeMap::new(),
            encoding: Self::DEFAULT_ENCODING.to_string(),
        }
    }

    /// Имя исходного файла
    pub fn file_name(&self) -> Option<String> {
        self.file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
    }

    pub fn add_entry(&mut self, entry: SubtitleEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubtitleEntry> {
        self.entries.iter()
    }

    /// Записи, упорядоченные по времени начала (сортировка устойчивая)
    pub fn entries_by_time(&self) -> Vec<&SubtitleEntry> {
        let mut sorted: Vec<&SubtitleEntry> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.start);
        sorted
    }

    /// Сортирует записи по времени начала и перенумеровывает их с 1
    pub fn sort_by_time(&mut self) {
        self.entries.sort_by_key(|e| e.start);
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.index = i + 1;
        }
    }

    /// Время окончания самой поздней записи
    pub fn total_duration(&self) -> Duration {
        self.entries.iter().map(|e| e.end).max().unwrap_or_default()
    }

    /// Документ пригоден для записи: есть записи, все интервалы упорядочены,
    /// формат известен
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// То же, что `is_valid`, но с причиной отказа
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.format.is_known() {
            return Err(Error::InvalidDocument("unknown format".to_string()));
        }
        if self.entries.is_empty() {
            return Err(Error::InvalidDocument("no subtitle entries".to_string()));
        }
        if let Some(entry) = self.entries.iter().find(|e| !e.is_ordered()) {
            return Err(Error::InvalidDocument(format!(
                "entry {} ends before it starts",
                entry.index
            )));
        }
        Ok(())
    }
}

impl std::ops::Index<usize> for SubtitleDocument {
    type Output = SubtitleEntry;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

impl fmt::Display for SubtitleDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.file_name().unwrap_or_else(|| "<memory>".to_string());
        write!(f, "{} ({}) - {} entries", name, self.format, self.len())
    }
}
