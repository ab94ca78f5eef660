//! Сообщения для пользователя на английском, китайском и японском.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::Error;

/// Язык интерфейса
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    English,
    Chinese,
    Japanese,
}

impl Language {
    pub const ALL: [Language; 3] = [Self::English, Self::Chinese, Self::Japanese];

    /// Язык по тегу локали (`zh_CN.UTF-8`, `ja-JP`, `en_US`...)
    pub fn from_locale(locale: &str) -> Self {
        let lang = locale
            .split(|c| c == '_' || c == '-' || c == '.' || c == '@')
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match lang.as_str() {
            "zh" => Self::Chinese,
            "ja" => Self::Japanese,
            _ => Self::English,
        }
    }

    /// Язык системы по переменным `LC_ALL`, `LC_MESSAGES`, `LANG`
    pub fn system_default() -> Self {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
            .map(|value| Self::from_locale(&value))
            .unwrap_or_default()
    }

    /// Название языка на нём самом
    pub fn native_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Chinese => "中文",
            Self::Japanese => "日本語",
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::English => "English",
            Self::Chinese => "Chinese",
            Self::Japanese => "Japanese",
        };
        f.write_str(name)
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Self::English),
            "chinese" | "zh" => Ok(Self::Chinese),
            "japanese" | "ja" => Ok(Self::Japanese),
            _ => Err(Error::InvalidParameters(format!("Unknown language: {}", s))),
        }
    }
}

/// Ключи сообщений
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    FileNotFound,
    UnrecognizedFormat,
    ParseFailed,
    InvalidFormat,
    /// {0} - текст ошибки
    ValidationFailed,
    /// {0} - название формата, {1} - число записей
    ValidFileMessage,
    StatusPending,
    StatusConverting,
    StatusCompleted,
    StatusCopied,
    StatusFailed,
    SkipReason,
    /// {0} - имя файла
    SavedTo,
    /// {0} - имя файла
    CopiedTo,
    /// {0} - число файлов
    BatchStarting,
    /// {0} - обработано, {1} - всего
    BatchProgress,
    /// {0} - сконвертировано, {1} - скопировано, {2} - ошибок
    BatchComplete,
    /// {0} - число файлов
    FilesValidated,
    Cancelled,
}

/// Превращает ключ сообщения в текст для пользователя
pub trait Localizer: Send + Sync {
    /// Текст сообщения без подстановок
    fn text(&self, key: MessageKey) -> String;

    /// Текст с подстановкой позиционных аргументов `{0}`, `{1}`...
    ///
    /// Заполнители внутри аргументов не подставляются, заполнители без
    /// аргумента остаются как есть.
    fn format(&self, key: MessageKey, args: &[&dyn Display]) -> String {
        let template = self.text(key);
        let mut message = String::with_capacity(template.len());
        let mut rest = template.as_str();

        while let Some(open) = rest.find('{') {
            message.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let placeholder = after.find('}').and_then(|close| {
                let index: usize = after[..close].parse().ok()?;
                args.get(index).map(|arg| (close, arg))
            });
            match placeholder {
                Some((close, arg)) => {
                    message.push_str(&arg.to_string());
                    rest = &after[close + 1..];
                }
                None => {
                    message.push('{');
                    rest = after;
                }
            }
        }

        message.push_str(rest);
        message
    }
}

/// Встроенные переводы
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLocalizer {
    language: Language,
}

impl BuiltinLocalizer {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn lookup(&self, key: MessageKey) -> &'static str {
        use Language::*;
        use MessageKey::*;

        let (en, zh, ja) = match key {
            FileNotFound => ("File not found", "文件不存在", "ファイルが見つかりません"),
            UnrecognizedFormat => (
                "Cannot recognize subtitle format",
                "无法识别字幕格式",
                "字幕形式を認識できません",
            ),
            ParseFailed => (
                "Failed to parse subtitle file",
                "解析字幕文件失败",
                "字幕ファイルの解析に失敗",
            ),
            InvalidFormat => (
                "Invalid subtitle file format",
                "字幕文件格式不正确",
                "字幕ファイル形式が正しくありません",
            ),
            ValidationFailed => ("Validation failed: {0}", "验证失败：{0}", "検証失敗：{0}"),
            ValidFileMessage => (
                "Valid {0} file containing {1} subtitle entries",
                "有效的{0}文件，包含{1}个字幕条目",
                "有効な{0}ファイル、{1}個の字幕エントリを含む",
            ),
            StatusPending => ("Pending", "待转换", "待機中"),
            StatusConverting => ("Converting...", "转换中...", "変換中..."),
            StatusCompleted => ("Completed", "已完成", "完了"),
            StatusCopied => ("Copied", "已复制", "コピー済み"),
            StatusFailed => ("Failed", "转换失败", "失敗"),
            SkipReason => (
                "Input and output formats are the same",
                "输入输出格式相同，跳过转换",
                "入出力形式が同じため、スキップ",
            ),
            SavedTo => ("Saved to: {0}", "已保存到: {0}", "保存先: {0}"),
            CopiedTo => ("Copied to: {0}", "已复制到: {0}", "コピー先: {0}"),
            BatchStarting => (
                "Starting batch conversion for {0} files...",
                "开始批量转换 {0} 个文件...",
                "{0}ファイルの一括変換開始...",
            ),
            BatchProgress => ("Progress: {0}/{1}", "转换进度: {0}/{1}", "進行状況: {0}/{1}"),
            BatchComplete => (
                "Batch conversion completed! Converted: {0}, Copied: {1}, Failed: {2}",
                "批量转换完成！已转换: {0}, 已复制: {1}, 失败: {2}",
                "一括変換完了！変換済み: {0}, コピー済み: {1}, 失敗: {2}",
            ),
            FilesValidated => ("Validated {0} files", "已验证 {0} 个文件", "{0}ファイルを検証完了"),
            Cancelled => ("Batch conversion cancelled", "批量转换已取消", "一括変換がキャンセルされました"),
        };

        match self.language {
            English => en,
            Chinese => zh,
            Japanese => ja,
        }
    }
}

impl Localizer for BuiltinLocalizer {
    fn text(&self, key: MessageKey) -> String {
        self.lookup(key).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_locale() {
        assert_eq!(Language::from_locale("zh_CN.UTF-8"), Language::Chinese);
        assert_eq!(Language::from_locale("ja-JP"), Language::Japanese);
        assert_eq!(Language::from_locale("ru_RU.UTF-8"), Language::English);
        assert_eq!(Language::from_locale(""), Language::English);
    }

    #[test]
    fn test_format_positional_args() {
        let en = BuiltinLocalizer::new(Language::English);
        assert_eq!(
            en.format(MessageKey::ValidFileMessage, &[&"SRT (SubRip)", &3]),
            "Valid SRT (SubRip) file containing 3 subtitle entries"
        );

        let ja = BuiltinLocalizer::new(Language::Japanese);
        assert_eq!(ja.format(MessageKey::BatchProgress, &[&1, &4]), "進行状況: 1/4");
    }

    #[test]
    fn test_format_does_not_expand_placeholders_in_arguments() {
        let en = BuiltinLocalizer::new(Language::English);
        assert_eq!(
            en.format(MessageKey::BatchProgress, &[&"{1}", &"{0}"]),
            "Progress: {1}/{0}"
        );
        assert_eq!(
            en.format(MessageKey::SavedTo, &[&"clip {1}.vtt"]),
            "Saved to: clip {1}.vtt"
        );
        // Аргумента нет: заполнитель остаётся
        assert_eq!(en.format(MessageKey::BatchProgress, &[&3]), "Progress: 3/{1}");
    }

    #[test]
    fn test_every_key_translated() {
        let keys = [
            MessageKey::FileNotFound,
            MessageKey::UnrecognizedFormat,
            MessageKey::ParseFailed,
            MessageKey::InvalidFormat,
            MessageKey::ValidationFailed,
            MessageKey::ValidFileMessage,
            MessageKey::Cancelled,
        ];
        for language in Language::ALL {
            let localizer = BuiltinLocalizer::new(language);
            for key in keys {
                assert!(!localizer.text(key).is_empty());
            }
        }
    }

    #[test]
    fn test_language_serde() {
        let json = serde_json::to_string(&Language::Chinese).unwrap();
        assert_eq!(json, "\"Chinese\"");
        assert_eq!("ja".parse::<Language>().unwrap(), Language::Japanese);
    }
}
