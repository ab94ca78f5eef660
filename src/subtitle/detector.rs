use std::path::Path;
use std::sync::Arc;

use crate::logging::log_debug;
use crate::subtitle::models::SubtitleFormat;
use crate::subtitle::parser::ParserRegistry;

/// Определяет формат субтитров по расширению и содержимому
///
/// Сначала проверяется только парсер, соответствующий расширению файла.
/// Если он не подтвердил формат, парсеры опрашиваются в порядке
/// регистрации (SRT, VTT, ASS) и выбирается первый подошедший.
/// Содержимое, похожее сразу на несколько форматов, определяется тем
/// этапом, который сработал первым.
#[derive(Clone)]
pub struct FormatDetector {
    registry: Arc<ParserRegistry>,
}

impl FormatDetector {
    pub fn new(registry: Arc<ParserRegistry>) -> Self {
        Self { registry }
    }

    /// Определение по пути и уже прочитанному содержимому
    pub fn detect<P: AsRef<Path>>(&self, path: P, content: &str) -> SubtitleFormat {
        let path = path.as_ref();
        let by_extension = SubtitleFormat::from_path(path);

        if let Some(parser) = self.registry.get(by_extension) {
            if parser.detect(content) {
                log_debug(&format!("Формат {} определён по расширению: {}", by_extension, path.display()));
                return by_extension;
            }
        }

        let format = self.detect_content(content);
        log_debug(&format!("Формат {} определён по содержимому: {}", format, path.display()));
        format
    }

    /// Определение только по содержимому
    pub fn detect_content(&self, content: &str) -> SubtitleFormat {
        self.registry
            .iter()
            .find(|parser| parser.detect(content))
            .map(|parser| parser.format())
            .unwrap_or(SubtitleFormat::Unknown)
    }
}

impl Default for FormatDetector {
    fn default() -> Self {
        Self::new(Arc::new(ParserRegistry::default()))
    }
}
