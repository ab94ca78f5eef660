use async_trait::async_trait;
use std::path::Path;
use tokio::fs;

use crate::error::{Error, Result};
use crate::logging::log_debug;

/// Максимальный размер файла субтитров по умолчанию (50 МБ)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Доступ к файлам, через который ядро читает и пишет субтитры
///
/// Содержимое всегда считается UTF-8.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Существует ли обычный файл
    async fn exists(&self, path: &Path) -> bool;

    /// Читает весь файл как текст; `Error::NotFound`, если файла нет
    async fn read_all_text(&self, path: &Path) -> Result<String>;

    /// Записывает текст, создавая недостающие каталоги
    async fn write_all_text(&self, path: &Path, content: &str) -> Result<()>;

    /// Копирует файл побайтно, возвращает число скопированных байт
    async fn copy_file(&self, source: &Path, target: &Path, overwrite: bool) -> Result<u64>;
}

/// Реализация поверх `tokio::fs`
#[derive(Debug, Clone)]
pub struct TokioFileSystem {
    max_file_size: u64,
}

impl TokioFileSystem {
    pub fn new() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Задает лимит размера читаемых файлов
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Указывают ли пути на один и тот же существующий файл
    async fn is_same_file(source: &Path, target: &Path) -> Result<bool> {
        if !fs::try_exists(target).await? {
            return Ok(false);
        }
        let source = fs::canonicalize(source).await?;
        let target = fs::canonicalize(target).await?;
        Ok(source == target)
    }

    async fn ensure_parent(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !fs::try_exists(parent).await? {
                fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }
}

impl Default for TokioFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileSystem for TokioFileSystem {
    async fn exists(&self, path: &Path) -> bool {
        fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false)
    }

    async fn read_all_text(&self, path: &Path) -> Result<String> {
        let metadata = match fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotFound(path.to_path_buf()))
            }
            Err(e) => return Err(Error::Io(e)),
        };

        if metadata.len() > self.max_file_size {
            return Err(Error::FileTooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                limit: self.max_file_size,
            });
        }

        let bytes = fs::read(path).await?;
        let mut content = String::from_utf8(bytes)
            .map_err(|e| Error::Encoding(format!("{}: {}", path.display(), e)))?;

        if content.starts_with('\u{feff}') {
            content.remove(0);
        }

        log_debug(&format!("Прочитано {} байт из {}", content.len(), path.display()));
        Ok(content)
    }

    async fn write_all_text(&self, path: &Path, content: &str) -> Result<()> {
        Self::ensure_parent(path).await?;
        fs::write(path, content).await?;
        log_debug(&format!("Записано {} байт в {}", content.len(), path.display()));
        Ok(())
    }

    async fn copy_file(&self, source: &Path, target: &Path, overwrite: bool) -> Result<u64> {
        if !self.exists(source).await {
            return Err(Error::NotFound(source.to_path_buf()));
        }
        // fs::copy открывает цель с усечением, копия файла в себя его обнулила бы
        if Self::is_same_file(source, target).await? {
            log_debug(&format!("Источник и цель совпадают, копирование пропущено: {}", source.display()));
            return Ok(fs::metadata(source).await?.len());
        }
        if !overwrite && fs::try_exists(target).await? {
            return Err(Error::AlreadyExists(target.to_path_buf()));
        }

        Self::ensure_parent(target).await?;
        let copied = fs::copy(source, target).await?;
        log_debug(&format!("Скопировано {} байт: {} -> {}", copied, source.display(), target.display()));
        Ok(copied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let result = TokioFileSystem::new().read_all_text(&dir.path().join("missing.srt")).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_read_strips_bom() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bom.srt");
        std::fs::write(&path, "\u{feff}1\n00:00:01,000 --> 00:00:02,000\nHi").unwrap();

        let content = TokioFileSystem::new().read_all_text(&path).await.unwrap();
        assert!(content.starts_with("1\n"));
    }

    #[tokio::test]
    async fn test_read_rejects_invalid_utf8_and_large_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.srt");
        std::fs::write(&path, [0x31, 0x0a, 0xff, 0xfe, 0x00]).unwrap();

        let fs = TokioFileSystem::new();
        assert!(matches!(fs.read_all_text(&path).await, Err(Error::Encoding(_))));

        let tiny = TokioFileSystem::new().with_max_file_size(2);
        assert!(matches!(tiny.read_all_text(&path).await, Err(Error::FileTooLarge { .. })));
    }

    #[tokio::test]
    async fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/out/a.vtt");

        let fs = TokioFileSystem::new();
        fs.write_all_text(&path, "WEBVTT\n\n").await.unwrap();

        assert!(fs.exists(&path).await);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "WEBVTT\n\n");
    }

    #[tokio::test]
    async fn test_copy_respects_overwrite_flag() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("a.srt");
        let target = dir.path().join("copy/a.srt");
        std::fs::write(&source, "abc").unwrap();

        let fs = TokioFileSystem::new();
        assert_eq!(fs.copy_file(&source, &target, true).await.unwrap(), 3);
        assert!(matches!(
            fs.copy_file(&source, &target, false).await,
            Err(Error::AlreadyExists(_))
        ));
        assert_eq!(fs.copy_file(&source, &target, true).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_copy_onto_itself_keeps_content() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let source = dir.path().join("a.srt");
        std::fs::write(&source, "abc").unwrap();
        let alias = dir.path().join("sub/../a.srt");

        let fs = TokioFileSystem::new();
        assert_eq!(fs.copy_file(&source, &alias, true).await.unwrap(), 3);
        assert_eq!(fs.copy_file(&source, &alias, false).await.unwrap(), 3);
        assert_eq!(std::fs::read_to_string(&source).unwrap(), "abc");
    }
}
