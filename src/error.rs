use std::path::PathBuf;
use thiserror::Error;

use crate::i18n::MessageKey;
use crate::subtitle::SubtitleFormat;

/// Типы ошибок, которые создаются из текстового сообщения
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    /// Ошибка ввода/вывода
    Io,
    /// Некорректная временная метка
    MalformedTime,
    /// Ошибка разбора субтитров
    ParseFailed,
    /// Документ не прошёл проверку
    InvalidDocument,
    /// Содержимое не в UTF-8
    Encoding,
    /// Неверные параметры
    InvalidParameters,
}

/// Ошибки, которые могут возникнуть при конвертации субтитров
#[derive(Debug, Error)]
pub enum Error {
    #[error("Ошибка ввода/вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Файл не найден: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Некорректная временная метка: {0}")]
    MalformedTime(String),

    #[error("Содержимое не соответствует формату {expected}")]
    InvalidFormat { expected: SubtitleFormat },

    #[error("Не удалось определить формат субтитров: {0}")]
    UnrecognizedFormat(String),

    #[error("Ошибка разбора субтитров: {0}")]
    ParseFailed(String),

    #[error("Некорректный документ субтитров: {0}")]
    InvalidDocument(String),

    #[error("Формат не поддерживается: {0}")]
    UnsupportedFormat(SubtitleFormat),

    #[error("Файл {} слишком большой: {size} байт (лимит {limit})", .path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("Ошибка кодировки: {0}")]
    Encoding(String),

    #[error("Файл уже существует: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Ошибка сериализации JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Неверные параметры: {0}")]
    InvalidParameters(String),

    #[error("{0}")]
    LoggedError(String),
}

impl Error {
    /// Создает новую ошибку указанного типа с сообщением
    pub fn new(error_type: ErrorType, message: &str) -> Self {
        match error_type {
            ErrorType::Io => Self::Io(std::io::Error::new(std::io::ErrorKind::Other, message)),
            ErrorType::MalformedTime => Self::MalformedTime(message.to_string()),
            ErrorType::ParseFailed => Self::ParseFailed(message.to_string()),
            ErrorType::InvalidDocument => Self::InvalidDocument(message.to_string()),
            ErrorType::Encoding => Self::Encoding(message.to_string()),
            ErrorType::InvalidParameters => Self::InvalidParameters(message.to_string()),
        }
    }

    /// Ключ локализации, под которым ошибка показывается пользователю
    pub fn message_key(&self) -> MessageKey {
        match self {
            Self::NotFound(_) => MessageKey::FileNotFound,
            Self::Io(e) if e.kind() == std::io::ErrorKind::NotFound => MessageKey::FileNotFound,
            Self::UnrecognizedFormat(_) => MessageKey::UnrecognizedFormat,
            Self::ParseFailed(_) => MessageKey::ParseFailed,
            Self::InvalidFormat { .. } | Self::InvalidDocument(_) => MessageKey::InvalidFormat,
            _ => MessageKey::ValidationFailed,
        }
    }
}

/// Результат с обработкой ошибок
pub type Result<T> = std::result::Result<T, Error>;
