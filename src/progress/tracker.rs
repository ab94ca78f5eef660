use std::sync::{Arc, Mutex, MutexGuard};

/// Тип для функций обратного вызова прогресса
pub type ProgressCallback = Box<dyn Fn(f32, &str) + Send + Sync + 'static>;

/// Трекер общего прогресса пакетной конвертации
#[derive(Clone)]
pub struct ProgressTracker {
    /// Текущий прогресс (от 0.0 до 100.0)
    progress: Arc<Mutex<f32>>,
    /// Текущий статус
    status: Arc<Mutex<String>>,
    callback: Option<Arc<ProgressCallback>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ProgressTracker {
    /// Создает новый трекер прогресса
    pub fn new() -> Self {
        Self {
            progress: Arc::new(Mutex::new(0.0)),
            status: Arc::new(Mutex::new(String::new())),
            callback: None,
        }
    }

    /// Создает новый трекер прогресса с функцией обратного вызова
    pub fn with_callback(callback: ProgressCallback) -> Self {
        Self {
            callback: Some(Arc::new(callback)),
            ..Self::new()
        }
    }

    /// Устанавливает функцию обратного вызова
    pub fn set_callback(&mut self, callback: ProgressCallback) {
        self.callback = Some(Arc::new(callback));
    }

    /// Обновляет прогресс
    pub fn update(&self, progress: f32, status: &str) {
        let clamped_progress = progress.clamp(0.0, 100.0);

        *lock(&self.progress) = clamped_progress;
        *lock(&self.status) = status.to_string();

        if let Some(callback) = &self.callback {
            callback(clamped_progress, status);
        }
    }

    /// Обновляет прогресс по числу обработанных элементов
    pub fn update_ratio(&self, processed: usize, total: usize, status: &str) {
        let progress = if total == 0 {
            100.0
        } else {
            processed as f32 / total as f32 * 100.0
        };
        self.update(progress, status);
    }

    /// Сбрасывает прогресс и статус без вызова callback
    pub fn reset(&self) {
        *lock(&self.progress) = 0.0;
        lock(&self.status).clear();
    }

    /// Возвращает текущий прогресс
    pub fn get_progress(&self) -> f32 {
        *lock(&self.progress)
    }

    /// Возвращает текущий статус
    pub fn get_status(&self) -> String {
        lock(&self.status).clone()
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}
