use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::i18n::MessageKey;
use crate::subtitle::SubtitleFormat;

/// Состояние элемента пакета
///
/// `Pending -> Converting -> Completed | Copied | Failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum ConversionStatus {
    #[default]
    Pending,
    Converting,
    Completed,
    Copied,
    Failed,
}

impl ConversionStatus {
    /// Ключ локализованного названия состояния
    pub fn message_key(&self) -> MessageKey {
        match self {
            Self::Pending => MessageKey::StatusPending,
            Self::Converting => MessageKey::StatusConverting,
            Self::Completed => MessageKey::StatusCompleted,
            Self::Copied => MessageKey::StatusCopied,
            Self::Failed => MessageKey::StatusFailed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Copied | Self::Failed)
    }
}

impl fmt::Display for ConversionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Один файл в пакете конвертации
///
/// Состояние, сообщение и прогресс меняет только оркестратор.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionItem {
    path: PathBuf,
    input_format: SubtitleFormat,
    output_format: SubtitleFormat,
    status: ConversionStatus,
    message: String,
    progress: f32,
}

impl ConversionItem {
    pub fn new<P: Into<PathBuf>>(path: P, output_format: SubtitleFormat) -> Self {
        Self {
            path: path.into(),
            input_format: SubtitleFormat::Unknown,
            output_format,
            status: ConversionStatus::Pending,
            message: String::new(),
            progress: 0.0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn input_format(&self) -> SubtitleFormat {
        self.input_format
    }

    pub fn output_format(&self) -> SubtitleFormat {
        self.output_format
    }

    pub fn status(&self) -> ConversionStatus {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Прогресс элемента от 0 до 100
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Входной и выходной форматы совпадают: файл копируется, а не конвертируется
    pub fn same_format(&self) -> bool {
        self.input_format == self.output_format
    }

    /// Подлежит ли элемент конвертации в текущем запуске
    pub fn is_eligible(&self) -> bool {
        self.status != ConversionStatus::Failed && self.input_format.is_known()
    }

    /// Путь результата: `<dir>/<имя без расширения><расширение формата>`
    pub fn output_path<P: AsRef<Path>>(&self, output_dir: P) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "subtitle".to_string());
        output_dir
            .as_ref()
            .join(format!("{}{}", stem, self.output_format.extension()))
    }

    pub(crate) fn set_input_format(&mut self, format: SubtitleFormat) {
        self.input_format = format;
    }

    pub(crate) fn set_output_format(&mut self, format: SubtitleFormat) {
        self.output_format = format;
    }

    pub(crate) fn set_state(&mut self, status: ConversionStatus, message: impl Into<String>, progress: f32) {
        self.status = status;
        self.message = message.into();
        self.progress = progress.clamp(0.0, 100.0);
    }
}
