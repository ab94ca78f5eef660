use std::path::Path;
use std::sync::Arc;

use crate::convert::validation::ValidationReport;
use crate::error::{Error, Result};
use crate::files::FileSystem;
use crate::i18n::{Localizer, MessageKey};
use crate::logging::{log_debug, log_info, log_warning};
use crate::subtitle::{FormatDetector, ParserRegistry, SubtitleDocument, SubtitleFormat};

/// Движок конвертации: определение формата, разбор, генерация, проверка
///
/// Не хранит документов между вызовами и может разделяться между задачами.
#[derive(Clone)]
pub struct ConversionEngine {
    registry: Arc<ParserRegistry>,
    detector: FormatDetector,
    files: Arc<dyn FileSystem>,
    localizer: Arc<dyn Localizer>,
}

impl ConversionEngine {
    /// Создает движок со стандартным набором парсеров
    pub fn new(files: Arc<dyn FileSystem>, localizer: Arc<dyn Localizer>) -> Self {
        Self::with_registry(Arc::new(ParserRegistry::default()), files, localizer)
    }

    /// Создает движок с заданной таблицей парсеров
    pub fn with_registry(
        registry: Arc<ParserRegistry>,
        files: Arc<dyn FileSystem>,
        localizer: Arc<dyn Localizer>,
    ) -> Self {
        Self {
            detector: FormatDetector::new(registry.clone()),
            registry,
            files,
            localizer,
        }
    }

    pub fn files(&self) -> &Arc<dyn FileSystem> {
        &self.files
    }

    pub fn localizer(&self) -> &Arc<dyn Localizer> {
        &self.localizer
    }

    /// Форматы, для которых есть парсер
    pub fn supported_formats(&self) -> Vec<SubtitleFormat> {
        self.registry.formats()
    }

    /// Определяет формат файла; при ошибке чтения возвращает Unknown
    pub async fn detect_format<P: AsRef<Path>>(&self, path: P) -> SubtitleFormat {
        let path = path.as_ref();
        match self.files.read_all_text(path).await {
            Ok(content) => self.detector.detect(path, &content),
            Err(e) => {
                log_warning(&format!("Не удалось прочитать {}: {}", path.display(), e));
                SubtitleFormat::Unknown
            }
        }
    }

    /// Определяет формат содержимого
    pub fn detect_format_from_content(&self, content: &str) -> SubtitleFormat {
        self.detector.detect_content(content)
    }

    /// Разбирает файл. `Ok(None)`, если формат не распознан
    pub async fn parse<P: AsRef<Path>>(&self, path: P) -> Result<Option<SubtitleDocument>> {
        let path = path.as_ref();
        let content = self.files.read_all_text(path).await?;
        let format = self.detector.detect(path, &content);

        Ok(self.parse_detected(format, &content).map(|mut document| {
            document.file_path = Some(path.to_path_buf());
            document
        }))
    }

    /// Разбирает содержимое. `None`, если формат не распознан
    pub fn parse_from_content(&self, content: &str) -> Option<SubtitleDocument> {
        let format = self.detector.detect_content(content);
        self.parse_detected(format, content)
    }

    fn parse_detected(&self, format: SubtitleFormat, content: &str) -> Option<SubtitleDocument> {
        let parser = self.registry.get(format)?;
        match parser.parse_checked(content) {
            Ok(document) => {
                log_debug(&format!("Разобрано {} записей формата {}", document.len(), format));
                Some(document)
            }
            Err(e) => {
                log_warning(&format!("Ошибка разбора: {}", e));
                None
            }
        }
    }

    /// Генерирует документ в целевом формате. Записи копируются без изменений:
    /// номера и время не пересчитываются. `None`, если для формата нет парсера
    pub fn convert(&self, document: &SubtitleDocument, target: SubtitleFormat) -> Option<String> {
        let parser = self.registry.get(target)?;

        let mut converted = SubtitleDocument::new(target);
        converted.title = document.title.clone();
        converted.encoding = document.encoding.clone();
        converted.entries = document.entries.clone();

        Some(parser.generate(&converted))
    }

    /// Разбор, проверка и конвертация содержимого в памяти
    pub fn convert_from_content(&self, content: &str, target: SubtitleFormat) -> Option<String> {
        let document = self.parse_from_content(content)?;
        if !document.is_valid() {
            return None;
        }
        self.convert(&document, target)
    }

    /// Конвертирует файл и сохраняет результат. Возвращает число записанных записей
    pub async fn try_convert_and_save<P, Q>(&self, source: P, target: Q, format: SubtitleFormat) -> Result<usize>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let (source, target) = (source.as_ref(), target.as_ref());

        let document = self
            .parse(source)
            .await?
            .ok_or_else(|| Error::UnrecognizedFormat(source.display().to_string()))?;
        document.validate()?;

        let content = self
            .convert(&document, format)
            .ok_or(Error::UnsupportedFormat(format))?;
        self.files.write_all_text(target, &content).await?;

        log_info(&format!(
            "Сконвертировано {} -> {} ({}, {} записей)",
            source.display(),
            target.display(),
            format,
            document.len()
        ));
        Ok(document.len())
    }

    /// То же, что `try_convert_and_save`, но любая ошибка превращается в `false`
    pub async fn convert_and_save<P, Q>(&self, source: P, target: Q, format: SubtitleFormat) -> bool
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let source = source.as_ref();
        match self.try_convert_and_save(source, target, format).await {
            Ok(_) => true,
            Err(e) => {
                log_warning(&format!("Конвертация {} не удалась: {}", source.display(), e));
                false
            }
        }
    }

    /// Проверяет файл: существование, формат, разбор, корректность документа
    pub async fn validate<P: AsRef<Path>>(&self, path: P) -> ValidationReport {
        let path = path.as_ref();

        if !self.files.exists(path).await {
            return ValidationReport::invalid(self.localizer.text(MessageKey::FileNotFound), SubtitleFormat::Unknown);
        }

        let content = match self.files.read_all_text(path).await {
            Ok(content) => content,
            Err(e) => return ValidationReport::invalid(self.describe_error(&e), SubtitleFormat::Unknown),
        };

        let format = self.detector.detect(path, &content);
        self.validate_detected(format, &content)
    }

    /// Проверяет содержимое в памяти
    pub fn validate_content(&self, content: &str) -> ValidationReport {
        let format = self.detector.detect_content(content);
        self.validate_detected(format, content)
    }

    fn validate_detected(&self, format: SubtitleFormat, content: &str) -> ValidationReport {
        if !format.is_known() {
            return ValidationReport::invalid(self.localizer.text(MessageKey::UnrecognizedFormat), format);
        }

        let Some(document) = self.parse_detected(format, content) else {
            return ValidationReport::invalid(self.localizer.text(MessageKey::ParseFailed), format);
        };

        if let Err(e) = document.validate() {
            log_debug(&format!("Документ не прошёл проверку: {}", e));
            return ValidationReport::invalid(self.localizer.text(MessageKey::InvalidFormat), format);
        }

        let message = self.localizer.format(
            MessageKey::ValidFileMessage,
            &[&format.display_name(), &document.len()],
        );
        ValidationReport::valid(message, format, document.len())
    }

    /// Локализованное описание ошибки
    pub fn describe_error(&self, error: &Error) -> String {
        match error.message_key() {
            MessageKey::ValidationFailed => self.localizer.format(MessageKey::ValidationFailed, &[error]),
            key => self.localizer.text(key),
        }
    }
}
