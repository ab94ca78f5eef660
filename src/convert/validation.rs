use serde::Serialize;

use crate::subtitle::SubtitleFormat;

/// Результат проверки файла или содержимого перед конвертацией
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Можно ли конвертировать
    pub is_valid: bool,
    /// Локализованное сообщение
    pub message: String,
    /// Определённый формат (Unknown, если определить не удалось)
    pub format: SubtitleFormat,
    /// Число записей, если разбор дошёл до конца
    pub entry_count: Option<usize>,
}

impl ValidationReport {
    pub fn valid(message: String, format: SubtitleFormat, entry_count: usize) -> Self {
        Self {
            is_valid: true,
            message,
            format,
            entry_count: Some(entry_count),
        }
    }

    pub fn invalid(message: String, format: SubtitleFormat) -> Self {
        Self {
            is_valid: false,
            message,
            format,
            entry_count: None,
        }
    }
}
