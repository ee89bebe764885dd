//! Application state.
//!
//! One immutable state object shared by all handlers. The only mutable
//! resource behind it is the file system, reached through the [FileStore]
//! trait objects.

use lumen_core::Config;
use lumen_processing::UploadValidator;
use lumen_storage::{CleanupSweeper, FileStore, LocalFileStore};
use std::sync::Arc;
use std::time::Duration;

pub struct AppState {
    pub config: Config,
    pub uploads: Arc<dyn FileStore>,
    pub processed: Arc<dyn FileStore>,
    pub sweeper: CleanupSweeper,
    pub validator: UploadValidator,
}

impl AppState {
    /// Build state with local flat-directory stores from the config paths.
    pub async fn new(config: Config) -> Result<Self, anyhow::Error> {
        let uploads: Arc<dyn FileStore> =
            Arc::new(LocalFileStore::new(config.upload_dir.clone()).await?);
        let processed: Arc<dyn FileStore> =
            Arc::new(LocalFileStore::new(config.processed_dir.clone()).await?);

        Ok(Self::with_stores(config, uploads, processed))
    }

    /// Build state with caller-provided stores (used by tests).
    pub fn with_stores(
        config: Config,
        uploads: Arc<dyn FileStore>,
        processed: Arc<dyn FileStore>,
    ) -> Self {
        let sweeper = CleanupSweeper::new(
            vec![uploads.clone(), processed.clone()],
            Duration::from_secs(config.retention_secs),
        );
        let validator = UploadValidator::new(
            config.max_file_size_bytes,
            config.max_image_dimension,
            config.allowed_extensions.clone(),
        );

        Self {
            config,
            uploads,
            processed,
            sweeper,
            validator,
        }
    }
}
