//! Регулярные выражения, общие для парсеров. Компилируются один раз при первом обращении.

use once_cell::sync::Lazy;
use regex::Regex;

fn compile(pattern: &str) -> Regex {
    // Шаблоны статические, ошибка компиляции возможна только при их правке
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {:?}: {}", pattern, e))
}

/// Диапазон SRT: `00:00:01,000 --> 00:00:03,000`
pub static SRT_TIME_RANGE: Lazy<Regex> = Lazy::new(|| {
    compile(r"(\d{2,}):(\d{2}):(\d{2}),(\d{3})\s*-->\s*(\d{2,}):(\d{2}):(\d{2}),(\d{3})")
});

/// Одиночная метка SRT
pub static SRT_TIME: Lazy<Regex> = Lazy::new(|| compile(r"^(\d{2,}):(\d{2}):(\d{2}),(\d{3})$"));

/// Номер блока SRT
pub static SRT_INDEX: Lazy<Regex> = Lazy::new(|| compile(r"^\d+$"));

/// Разделитель блоков SRT
pub static SRT_BLOCK_SEPARATOR: Lazy<Regex> = Lazy::new(|| compile(r"\r\n\r\n|\n\n"));

/// Диапазон VTT: `00:00:01.000 --> 00:00:03.000`, часы необязательны,
/// настройки cue после времени окончания игнорируются
pub static VTT_TIME_RANGE: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?:(\d{2,}):)?(\d{2}):(\d{2})\.(\d{3})\s*-->\s*(?:(\d{2,}):)?(\d{2}):(\d{2})\.(\d{3})",
    )
});

/// Одиночная метка VTT
pub static VTT_TIME: Lazy<Regex> = Lazy::new(|| compile(r"^(?:(\d{2,}):)?(\d{2}):(\d{2})\.(\d{3})$"));

/// Одиночная метка ASS: `1:00:00.00`
pub static ASS_TIME: Lazy<Regex> = Lazy::new(|| compile(r"^(\d+):(\d{2}):(\d{2})\.(\d{2})$"));

/// Строка события ASS, текст забирает все оставшиеся запятые
pub static ASS_DIALOGUE: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"^(?i:dialogue):\s*(?:Marked=)?\d+,(\d+:\d{2}:\d{2}\.\d{2}),(\d+:\d{2}:\d{2}\.\d{2}),([^,]*),([^,]*),([^,]*),([^,]*),([^,]*),([^,]*),(.*)$",
    )
});

/// Тег переопределения стиля ASS: `{\b1}`. Вложенность не поддерживается
pub static ASS_OVERRIDE_TAG: Lazy<Regex> = Lazy::new(|| compile(r"\{[^}]*\}"));

/// Определение стиля ASS: `Style: Default,Arial,20,...`
pub static ASS_STYLE: Lazy<Regex> = Lazy::new(|| compile(r"^(?i:style):\s*([^,]+),(.*)$"));

/// Заголовок скрипта ASS
pub static ASS_TITLE: Lazy<Regex> = Lazy::new(|| compile(r"^(?i:title):\s*(.*)$"));
