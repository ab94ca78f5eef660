use std::path::{Path, PathBuf};

use crate::batch::item::{ConversionItem, ConversionStatus};
use crate::batch::summary::{BatchSummary, CancellationFlag};
use crate::convert::ConversionEngine;
use crate::error::Result;
use crate::i18n::MessageKey;
use crate::logging::{log_debug, log_info, log_warning};
use crate::progress::ProgressTracker;
use crate::subtitle::SubtitleFormat;

/// Callback, вызываемый при каждом изменении состояния элемента
pub type ItemCallback = Box<dyn Fn(&ConversionItem) + Send + Sync + 'static>;

/// Последовательная конвертация набора файлов
///
/// Ошибка одного элемента не прерывает пакет. Отмена проверяется только
/// между элементами.
pub struct BatchOrchestrator {
    engine: ConversionEngine,
    items: Vec<ConversionItem>,
    output_format: SubtitleFormat,
    overwrite: bool,
    progress_tracker: ProgressTracker,
    item_callback: Option<ItemCallback>,
    cancellation: CancellationFlag,
}

impl BatchOrchestrator {
    pub fn new(engine: ConversionEngine) -> Self {
        Self {
            engine,
            items: Vec::new(),
            output_format: SubtitleFormat::Srt,
            overwrite: true,
            progress_tracker: ProgressTracker::new(),
            item_callback: None,
            cancellation: CancellationFlag::new(),
        }
    }

    /// Формат, назначаемый новым элементам
    pub fn with_output_format(mut self, format: SubtitleFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Перезаписывать ли существующие файлы при копировании
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_progress_tracker(mut self, tracker: ProgressTracker) -> Self {
        self.progress_tracker = tracker;
        self
    }

    pub fn with_item_callback(mut self, callback: ItemCallback) -> Self {
        self.item_callback = Some(callback);
        self
    }

    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancellation = flag;
        self
    }

    pub fn engine(&self) -> &ConversionEngine {
        &self.engine
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress_tracker
    }

    /// Копия флага отмены, которую можно передать в другую задачу
    pub fn cancellation_flag(&self) -> CancellationFlag {
        self.cancellation.clone()
    }

    pub fn items(&self) -> &[ConversionItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Добавляет файлы, пропуская уже добавленные. Возвращает число новых
    pub fn add_files<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut added = 0;
        for path in paths {
            let path = path.into();
            if self.items.iter().any(|item| item.path() == path.as_path()) {
                log_debug(&format!("Файл уже в списке: {}", path.display()));
                continue;
            }
            self.items.push(ConversionItem::new(path, self.output_format));
            added += 1;
        }
        added
    }

    /// Удаляет файл из пакета
    pub fn remove_file<P: AsRef<Path>>(&mut self, path: P) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.path() != path.as_ref());
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.progress_tracker.reset();
    }

    /// Текущие счётчики без запуска конвертации
    pub fn summary(&self) -> BatchSummary {
        BatchSummary::from_items(
            &self.items,
            self.cancellation.is_cancelled(),
            self.progress_tracker.get_progress(),
        )
    }

    /// Проверяет все элементы. Непрошедшие переходят в Failed,
    /// остальные остаются Pending с определённым входным форматом.
    /// Возвращает число корректных файлов
    pub async fn validate_all(&mut self) -> usize {
        let mut valid = 0;
        for index in 0..self.items.len() {
            let report = self.engine.validate(self.items[index].path()).await;

            let item = &mut self.items[index];
            item.set_input_format(report.format);
            if report.is_valid {
                valid += 1;
                item.set_state(ConversionStatus::Pending, report.message, 0.0);
            } else {
                log_warning(&format!("{}: {}", item.path().display(), report.message));
                item.set_state(ConversionStatus::Failed, report.message, 0.0);
            }
            self.notify(index);
        }

        log_info(
            &self
                .engine
                .localizer()
                .format(MessageKey::FilesValidated, &[&self.items.len()]),
        );
        valid
    }

    /// Проверяет и конвертирует все элементы в `output_format`, сохраняя
    /// результаты в `output_dir`
    ///
    /// Флаг отмены сбрасывается в начале запуска: отмена действует только
    /// на уже идущий пакет.
    pub async fn run<P: AsRef<Path>>(&mut self, output_dir: P, output_format: SubtitleFormat) -> BatchSummary {
        let output_dir = output_dir.as_ref();
        self.output_format = output_format;
        for item in &mut self.items {
            item.set_output_format(output_format);
        }

        self.progress_tracker.reset();
        self.cancellation.reset();
        self.validate_all().await;

        let eligible: Vec<usize> = (0..self.items.len())
            .filter(|&index| self.items[index].is_eligible())
            .collect();
        let total = eligible.len();

        let localizer = self.engine.localizer().clone();
        let starting = localizer.format(MessageKey::BatchStarting, &[&total]);
        log_info(&starting);
        self.progress_tracker.update_ratio(0, total, &starting);

        let mut cancelled = false;
        for (processed, &index) in eligible.iter().enumerate() {
            if self.cancellation.is_cancelled() {
                cancelled = true;
                break;
            }

            self.process_item(index, output_dir).await;

            let status = localizer.format(MessageKey::BatchProgress, &[&(processed + 1), &total]);
            self.progress_tracker.update_ratio(processed + 1, total, &status);
        }

        let summary = BatchSummary::from_items(&self.items, cancelled, self.progress_tracker.get_progress());
        let message = if cancelled {
            localizer.text(MessageKey::Cancelled)
        } else {
            localizer.format(
                MessageKey::BatchComplete,
                &[&summary.completed, &summary.copied, &summary.failed],
            )
        };
        log_info(&message);
        self.progress_tracker.update(summary.progress, &message);

        summary
    }

    async fn process_item(&mut self, index: usize, output_dir: &Path) {
        let localizer = self.engine.localizer().clone();

        self.items[index].set_state(
            ConversionStatus::Converting,
            localizer.text(MessageKey::StatusConverting),
            0.0,
        );
        self.notify(index);

        let item = &self.items[index];
        let source = item.path().to_path_buf();
        let target = item.output_path(output_dir);
        let target_name = target
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let (status, message) = if item.same_format() {
            log_debug(&format!(
                "{}: {}",
                source.display(),
                localizer.text(MessageKey::SkipReason)
            ));
            match self.copy(&source, &target).await {
                Ok(()) => (
                    ConversionStatus::Copied,
                    localizer.format(MessageKey::CopiedTo, &[&target_name]),
                ),
                Err(e) => {
                    log_warning(&format!("Копирование {} не удалось: {}", source.display(), e));
                    (ConversionStatus::Failed, self.engine.describe_error(&e))
                }
            }
        } else {
            match self
                .engine
                .try_convert_and_save(&source, &target, item.output_format())
                .await
            {
                Ok(_) => (
                    ConversionStatus::Completed,
                    localizer.format(MessageKey::SavedTo, &[&target_name]),
                ),
                Err(e) => {
                    log_warning(&format!("Конвертация {} не удалась: {}", source.display(), e));
                    (ConversionStatus::Failed, self.engine.describe_error(&e))
                }
            }
        };

        let progress = if status == ConversionStatus::Failed { 0.0 } else { 100.0 };
        self.items[index].set_state(status, message, progress);
        self.notify(index);
    }

    async fn copy(&self, source: &Path, target: &Path) -> Result<()> {
        self.engine
            .files()
            .copy_file(source, target, self.overwrite)
            .await
            .map(|_| ())
    }

    fn notify(&self, index: usize) {
        if let Some(callback) = &self.item_callback {
            callback(&self.items[index]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::TokioFileSystem;
    use crate::i18n::{BuiltinLocalizer, Language};
    use std::sync::Arc;

    fn orchestrator() -> BatchOrchestrator {
        let engine = ConversionEngine::new(
            Arc::new(TokioFileSystem::new()),
            Arc::new(BuiltinLocalizer::new(Language::English)),
        );
        BatchOrchestrator::new(engine).with_output_format(SubtitleFormat::Vtt)
    }

    #[test]
    fn test_add_files_deduplicates() {
        let mut batch = orchestrator();
        assert_eq!(batch.add_files(["a.srt", "b.ass", "a.srt"]), 2);
        assert_eq!(batch.add_files(["b.ass"]), 0);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.items()[0].output_format(), SubtitleFormat::Vtt);

        assert!(batch.remove_file("a.srt"));
        assert!(!batch.remove_file("a.srt"));
        assert_eq!(batch.len(), 1);

        batch.clear();
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn test_run_empty_batch() {
        let dir = tempfile::tempdir().unwrap();
        let mut batch = orchestrator();

        let summary = batch.run(dir.path(), SubtitleFormat::Ass).await;
        assert_eq!(summary.total, 0);
        assert_eq!(summary.progress, 100.0);
        assert!(!summary.cancelled);
    }

    #[tokio::test]
    async fn test_missing_file_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let mut batch = orchestrator();
        batch.add_files([dir.path().join("missing.srt")]);

        assert_eq!(batch.validate_all().await, 0);
        let item = &batch.items()[0];
        assert_eq!(item.status(), ConversionStatus::Failed);
        assert_eq!(item.message(), "File not found");
        assert_eq!(item.input_format(), SubtitleFormat::Unknown);
    }
}
