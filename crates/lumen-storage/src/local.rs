use crate::traits::{DirStats, FileStore, StorageError, StorageResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local flat-directory storage implementation
#[derive(Clone)]
pub struct LocalFileStore {
    base_path: PathBuf,
}

impl LocalFileStore {
    /// Create a new LocalFileStore, creating the directory if needed.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalFileStore { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Convert a filename to a filesystem path with traversal validation.
    ///
    /// Filenames are flat keys; anything containing a path separator or a
    /// parent reference is rejected before touching the filesystem.
    fn filename_to_path(&self, filename: &str) -> StorageResult<PathBuf> {
        if filename.is_empty()
            || filename.contains("..")
            || filename.contains('/')
            || filename.contains('\\')
        {
            return Err(StorageError::InvalidFilename(
                "Filename contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(filename))
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn put(&self, filename: &str, data: Vec<u8>) -> StorageResult<()> {
        let path = self.filename_to_path(filename)?;
        let size = data.len();
        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(())
    }

    async fn get(&self, filename: &str) -> StorageResult<Vec<u8>> {
        let path = self.filename_to_path(filename)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(filename.to_string()));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::ReadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        tracing::debug!(
            path = %path.display(),
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage read successful"
        );

        Ok(data)
    }

    async fn exists(&self, filename: &str) -> StorageResult<bool> {
        let path = self.filename_to_path(filename)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn delete(&self, filename: &str) -> StorageResult<()> {
        let path = self.filename_to_path(filename)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(path = %path.display(), "Local storage delete successful");

        Ok(())
    }

    async fn list_older_than(&self, max_age: Duration) -> StorageResult<Vec<String>> {
        let mut stale = Vec::new();
        let mut entries = fs::read_dir(&self.base_path).await?;

        while let Some(entry) = entries.next_entry().await? {
            let metadata = match entry.metadata().await {
                Ok(m) if m.is_file() => m,
                _ => continue,
            };

            // Entries with unreadable or future timestamps are skipped; the
            // next sweep gets another chance at them.
            let age = metadata
                .modified()
                .ok()
                .and_then(|mtime| mtime.elapsed().ok());
            if let Some(age) = age {
                if age > max_age {
                    if let Some(name) = entry.file_name().to_str() {
                        stale.push(name.to_string());
                    }
                }
            }
        }

        Ok(stale)
    }

    async fn stats(&self) -> StorageResult<DirStats> {
        let mut stats = DirStats::default();
        let mut entries = fs::read_dir(&self.base_path).await?;

        while let Some(entry) = entries.next_entry().await? {
            if let Ok(metadata) = entry.metadata().await {
                if metadata.is_file() {
                    stats.file_count += 1;
                    stats.total_bytes += metadata.len();
                }
            }
        }

        Ok(stats)
    }
}
