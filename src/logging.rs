use log::{debug, error, info, trace, warn, LevelFilter, Log};
use env_logger::Builder;
use std::io::Write;
use std::sync::Once;

static INIT: Once = Once::new();

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Простой логгер для тестов, пишет в stdout
#[derive(Clone)]
pub struct TestLogger {
    level: LevelFilter,
}

impl TestLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

impl Log for TestLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            println!(
                "{} [{}] {} - {}",
                chrono::Local::now().format(TIMESTAMP_FORMAT),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// Настраивает логирование для библиотеки и CLI
///
/// Повторный вызов ничего не делает: логгер устанавливается один раз на процесс.
pub fn setup_logging(level: LevelFilter) {
    let mut builder = Builder::new();

    builder.filter_level(level);
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] - {}",
            chrono::Local::now().format(TIMESTAMP_FORMAT),
            record.level(),
            record.args()
        )
    });

    if builder.try_init().is_ok() {
        debug!("Логирование настроено с уровнем: {}", level);
    }
}

/// Настраивает логирование для тестов
pub fn setup_test_logging(level: LevelFilter) {
    INIT.call_once(|| {
        let logger = TestLogger::new(level);
        if log::set_boxed_logger(Box::new(logger)).is_ok() {
            log::set_max_level(level);
        }
    });
}

/// Логирует ошибку и возвращает её
pub fn log_error<T, E: std::fmt::Display>(err: E, message: &str) -> Result<T, crate::error::Error> {
    let error_message = format!("{}: {}", message, err);
    error!("{}", error_message);
    Err(crate::error::Error::LoggedError(error_message))
}

/// Логирует предупреждение
pub fn log_warning(message: &str) {
    warn!("{}", message);
}

/// Логирует информационное сообщение
pub fn log_info(message: &str) {
    info!("{}", message);
}

/// Логирует отладочное сообщение
pub fn log_debug(message: &str) {
    debug!("{}", message);
}

/// Логирует трассировочное сообщение
pub fn log_trace(message: &str) {
    trace!("{}", message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_log_error_wraps_message() {
        setup_test_logging(LevelFilter::Debug);

        let result: Result<(), Error> = log_error("disk full", "Не удалось записать файл");
        match result {
            Err(Error::LoggedError(msg)) => assert_eq!(msg, "Не удалось записать файл: disk full"),
            other => panic!("Expected LoggedError, got {:?}", other),
        }
    }

    #[test]
    fn test_setup_logging_is_idempotent() {
        setup_logging(LevelFilter::Info);
        setup_logging(LevelFilter::Debug);
        log_info("second setup is a no-op");
    }
}
