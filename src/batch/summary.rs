use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::batch::item::{ConversionItem, ConversionStatus};

/// Итог пакетной конвертации
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub completed: usize,
    pub copied: usize,
    pub failed: usize,
    pub pending: usize,
    /// Запуск остановлен флагом отмены
    pub cancelled: bool,
    /// Общий прогресс от 0 до 100
    pub progress: f32,
}

impl BatchSummary {
    pub fn from_items(items: &[ConversionItem], cancelled: bool, progress: f32) -> Self {
        let count = |status: ConversionStatus| items.iter().filter(|item| item.status() == status).count();

        Self {
            total: items.len(),
            completed: count(ConversionStatus::Completed),
            copied: count(ConversionStatus::Copied),
            failed: count(ConversionStatus::Failed),
            pending: count(ConversionStatus::Pending),
            cancelled,
            progress,
        }
    }

    /// Все элементы завершились без ошибок
    pub fn is_success(&self) -> bool {
        self.failed == 0 && !self.cancelled && self.completed + self.copied == self.total
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Всего: {}, сконвертировано: {}, скопировано: {}, ошибок: {}",
            self.total, self.completed, self.copied, self.failed
        )?;
        if self.cancelled {
            write!(f, ", отменено (не обработано: {})", self.pending)?;
        }
        Ok(())
    }
}

/// Флаг отмены пакета; проверяется между элементами
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
