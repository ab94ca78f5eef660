use std::sync::Arc;

use crate::error::{Error, Result};
use crate::subtitle::ass::AssParser;
use crate::subtitle::models::{SubtitleDocument, SubtitleFormat};
use crate::subtitle::srt::SrtParser;
use crate::subtitle::vtt::VttParser;

/// Общий интерфейс парсеров субтитров
///
/// Парсеры не хранят состояния и могут разделяться между потоками.
pub trait SubtitleParser: Send + Sync {
    /// Формат, который обрабатывает парсер
    fn format(&self) -> SubtitleFormat;

    /// Быстрая эвристическая проверка формата без полного разбора
    fn detect(&self, content: &str) -> bool;

    /// Разбирает содержимое. Некорректные строки и блоки пропускаются,
    /// поэтому разбор не завершается ошибкой
    fn parse(&self, content: &str) -> SubtitleDocument;

    /// Генерирует текст файла из документа
    fn generate(&self, document: &SubtitleDocument) -> String;

    /// Разбирает содержимое только если `detect` его принимает
    fn parse_checked(&self, content: &str) -> Result<SubtitleDocument> {
        if !self.detect(content) {
            return Err(Error::InvalidFormat {
                expected: self.format(),
            });
        }
        Ok(self.parse(content))
    }
}

/// Убирает BOM в начале содержимого
pub(crate) fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

/// Проверяет префикс строки без учёта регистра ASCII
pub(crate) fn starts_with_ignore_case(line: &str, prefix: &str) -> bool {
    line.get(..prefix.len())
        .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
}

/// Непустые строки содержимого без пробелов по краям; используется в `detect`
pub(crate) fn significant_lines(content: &str) -> Vec<&str> {
    strip_bom(content)
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Таблица парсеров, ключ - формат. Порядок объявления SRT, VTT, ASS
/// определяет порядок перебора при определении формата по содержимому
#[derive(Clone)]
pub struct ParserRegistry {
    parsers: Vec<Arc<dyn SubtitleParser>>,
}

impl ParserRegistry {
    /// Создает пустую таблицу
    pub fn empty() -> Self {
        Self { parsers: Vec::new() }
    }

    /// Регистрирует парсер; парсер того же формата заменяется на месте
    pub fn register(&mut self, parser: Arc<dyn SubtitleParser>) {
        match self.parsers.iter().position(|p| p.format() == parser.format()) {
            Some(pos) => self.parsers[pos] = parser,
            None => self.parsers.push(parser),
        }
    }

    /// Парсер для формата
    pub fn get(&self, format: SubtitleFormat) -> Option<&dyn SubtitleParser> {
        self.parsers
            .iter()
            .find(|p| p.format() == format)
            .map(|p| p.as_ref())
    }

    /// Парсеры в порядке регистрации
    pub fn iter(&self) -> impl Iterator<Item = &dyn SubtitleParser> {
        self.parsers.iter().map(|p| p.as_ref())
    }

    /// Форматы в порядке регистрации
    pub fn formats(&self) -> Vec<SubtitleFormat> {
        self.parsers.iter().map(|p| p.format()).collect()
    }

    pub fn contains(&self, format: SubtitleFormat) -> bool {
        self.get(format).is_some()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(SrtParser));
        registry.register(Arc::new(VttParser));
        registry.register(Arc::new(AssParser));
        registry
    }
}
