pub mod error;
pub mod logging;
pub mod subtitle;
pub mod files;
pub mod i18n;
pub mod convert;
pub mod batch;
pub mod progress;

pub use error::{Error, Result, ErrorType};
pub use logging::{
    setup_logging, setup_test_logging, log_error, log_warning, log_info, log_debug, log_trace
};
pub use subtitle::{
    SubtitleDocument, SubtitleEntry, SubtitleFormat,
    SubtitleParser, ParserRegistry, FormatDetector,
    SrtParser, VttParser, AssParser
};
pub use files::{FileSystem, TokioFileSystem, DEFAULT_MAX_FILE_SIZE};
pub use i18n::{Language, Localizer, BuiltinLocalizer, MessageKey};
pub use convert::{ConversionEngine, ValidationReport};
pub use batch::{
    BatchOrchestrator, BatchSummary, CancellationFlag,
    ConversionItem, ConversionStatus, ItemCallback
};
pub use progress::{ProgressTracker, ProgressCallback};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Настройки конвертера
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterOptions {
    /// Формат результата
    pub output_format: SubtitleFormat,

    /// Язык сообщений для пользователя
    pub language: Language,

    /// Уровень логирования
    pub log_level: log::LevelFilter,

    /// Перезаписывать ли существующие файлы при копировании
    pub overwrite: bool,

    /// Максимальный размер входного файла в байтах
    pub max_file_size: u64,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            output_format: SubtitleFormat::Srt,
            language: Language::system_default(),
            log_level: log::LevelFilter::Info,
            overwrite: true,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

type SharedItemCallback = Arc<dyn Fn(&ConversionItem) + Send + Sync + 'static>;

/// Основной интерфейс для конвертации субтитров
pub struct SubtitleConvert {
    options: ConverterOptions,
    engine: ConversionEngine,
    progress_tracker: ProgressTracker,
    item_callback: Option<SharedItemCallback>,
    cancellation: CancellationFlag,
}

impl SubtitleConvert {
    /// Создает новый экземпляр SubtitleConvert с заданными настройками
    pub fn new(options: ConverterOptions) -> Self {
        #[cfg(test)]
        {
            setup_test_logging(options.log_level);
        }
        #[cfg(not(test))]
        {
            setup_logging(options.log_level);
        }

        log_info(&format!("Создан новый экземпляр SubtitleConvert с настройками: {:?}", options));

        Self {
            engine: Self::build_engine(&options),
            options,
            progress_tracker: ProgressTracker::new(),
            item_callback: None,
            cancellation: CancellationFlag::new(),
        }
    }

    fn build_engine(options: &ConverterOptions) -> ConversionEngine {
        ConversionEngine::new(
            Arc::new(TokioFileSystem::new().with_max_file_size(options.max_file_size)),
            Arc::new(BuiltinLocalizer::new(options.language)),
        )
    }

    /// Устанавливает формат результата
    pub fn with_output_format(mut self, format: SubtitleFormat) -> Self {
        log_debug(&format!("Установлен формат результата: {}", format));
        self.options.output_format = format;
        self
    }

    /// Устанавливает язык сообщений
    pub fn with_language(mut self, language: Language) -> Self {
        log_debug(&format!("Установлен язык сообщений: {}", language));
        self.options.language = language;
        self.engine = Self::build_engine(&self.options);
        self
    }

    /// Устанавливает перезапись существующих файлов
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        log_debug(&format!("Установлена перезапись файлов: {}", overwrite));
        self.options.overwrite = overwrite;
        self
    }

    /// Устанавливает функцию обратного вызова для отслеживания прогресса
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        log_debug("Установлена функция обратного вызова для отслеживания прогресса");
        self.progress_tracker = ProgressTracker::with_callback(callback);
        self
    }

    /// Устанавливает функцию обратного вызова для изменений состояния файлов
    pub fn with_item_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ConversionItem) + Send + Sync + 'static,
    {
        log_debug("Установлена функция обратного вызова для состояния файлов");
        self.item_callback = Some(Arc::new(callback));
        self
    }

    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    pub fn engine(&self) -> &ConversionEngine {
        &self.engine
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress_tracker
    }

    /// Флаг отмены, общий для всех пакетов этого экземпляра.
    /// Каждый новый пакет начинает со сброшенным флагом.
    pub fn cancellation_flag(&self) -> CancellationFlag {
        self.cancellation.clone()
    }

    pub fn supported_formats(&self) -> Vec<SubtitleFormat> {
        self.engine.supported_formats()
    }

    /// Определяет формат файла
    pub async fn detect<P: AsRef<Path>>(&self, path: P) -> SubtitleFormat {
        self.engine.detect_format(path).await
    }

    /// Проверяет файл перед конвертацией
    pub async fn validate<P: AsRef<Path>>(&self, path: P) -> ValidationReport {
        self.engine.validate(path).await
    }

    /// Конвертирует содержимое в памяти в формат из настроек
    pub fn convert_content(&self, content: &str) -> Option<String> {
        self.engine.convert_from_content(content, self.options.output_format)
    }

    /// Конвертирует один файл в `output_dir`, возвращает путь результата
    pub async fn convert_file<P, Q>(&self, source: P, output_dir: Q) -> Result<PathBuf>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let item = ConversionItem::new(source.as_ref(), self.options.output_format);
        let target = item.output_path(output_dir);

        match self
            .engine
            .try_convert_and_save(source.as_ref(), &target, self.options.output_format)
            .await
        {
            Ok(_) => Ok(target),
            Err(e) => log_error(&e, &format!("Ошибка при конвертации файла: {}", source.as_ref().display())),
        }
    }

    /// Создает оркестратор пакета с настройками этого экземпляра
    pub fn batch(&self) -> BatchOrchestrator {
        let mut orchestrator = BatchOrchestrator::new(self.engine.clone())
            .with_output_format(self.options.output_format)
            .with_overwrite(self.options.overwrite)
            .with_progress_tracker(self.progress_tracker.clone())
            .with_cancellation(self.cancellation.clone());

        if let Some(callback) = &self.item_callback {
            let callback = callback.clone();
            orchestrator = orchestrator.with_item_callback(Box::new(move |item: &ConversionItem| callback(item)));
        }
        orchestrator
    }

    /// Конвертирует набор файлов в `output_dir`
    pub async fn convert_files<I, P, Q>(&self, paths: I, output_dir: Q) -> BatchSummary
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
        Q: AsRef<Path>,
    {
        let mut batch = self.batch();
        batch.add_files(paths);
        batch.run(output_dir, self.options.output_format).await
    }
}

impl Default for SubtitleConvert {
    fn default() -> Self {
        Self::new(ConverterOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults() {
        let options = ConverterOptions::default();
        assert_eq!(options.output_format, SubtitleFormat::Srt);
        assert_eq!(options.log_level, log::LevelFilter::Info);
        assert!(options.overwrite);
        assert_eq!(options.max_file_size, 50 * 1024 * 1024);
    }

    #[test]
    fn test_options_partial_json() {
        let options: ConverterOptions =
            serde_json::from_str(r#"{"output_format":"Vtt","language":"Japanese"}"#).unwrap();
        assert_eq!(options.output_format, SubtitleFormat::Vtt);
        assert_eq!(options.language, Language::Japanese);
        assert!(options.overwrite);
    }

    #[test]
    fn test_convert_content_uses_output_format() {
        let converter = SubtitleConvert::new(ConverterOptions {
            language: Language::English,
            ..ConverterOptions::default()
        })
        .with_output_format(SubtitleFormat::Ass);

        let ass = converter
            .convert_content("WEBVTT\n\n00:01.000 --> 00:02.500\nHi")
            .unwrap();
        assert!(ass.contains("Dialogue: 0,0:00:01.00,0:00:02.50,Default,,0,0,0,,Hi"));
    }
}
