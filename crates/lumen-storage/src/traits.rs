//! Storage abstraction trait
//!
//! This module defines the FileStore trait the orchestrator works against,
//! so the flat-directory backend can be swapped for an indexed one without
//! touching request handling.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Aggregate numbers derived from a directory listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirStats {
    pub file_count: usize,
    pub total_bytes: u64,
}

/// Storage abstraction for one flat directory of image blobs.
///
/// Filenames are opaque keys minted by the caller; backends must reject
/// names that would escape the directory.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Persist a file under the given name, overwriting any existing entry.
    async fn put(&self, filename: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Read a file's full contents.
    async fn get(&self, filename: &str) -> StorageResult<Vec<u8>>;

    /// Check if a file exists.
    async fn exists(&self, filename: &str) -> StorageResult<bool>;

    /// Delete a file. Deleting a missing file is not an error.
    async fn delete(&self, filename: &str) -> StorageResult<()>;

    /// List files whose age (by modification time) exceeds `max_age`.
    async fn list_older_than(&self, max_age: Duration) -> StorageResult<Vec<String>>;

    /// Count files and sum their sizes.
    async fn stats(&self) -> StorageResult<DirStats>;
}
