//! Time-based cleanup of stale files.

use crate::traits::FileStore;
use std::sync::Arc;
use std::time::Duration;

/// Best-effort retention sweep over a set of stores.
///
/// Each sweep lists entries older than the retention window and deletes
/// them one by one. Failures are logged and swallowed: the sweep runs
/// opportunistically inside request handling and must never fail a request.
#[derive(Clone)]
pub struct CleanupSweeper {
    stores: Vec<Arc<dyn FileStore>>,
    retention: Duration,
}

impl CleanupSweeper {
    pub fn new(stores: Vec<Arc<dyn FileStore>>, retention: Duration) -> Self {
        Self { stores, retention }
    }

    pub fn retention(&self) -> Duration {
        self.retention
    }

    /// Delete all files past the retention window. Returns the number of
    /// files actually removed.
    pub async fn sweep(&self) -> usize {
        let mut removed = 0;

        for store in &self.stores {
            let stale = match store.list_older_than(self.retention).await {
                Ok(stale) => stale,
                Err(e) => {
                    tracing::warn!(error = %e, "Cleanup sweep failed to list stale files");
                    continue;
                }
            };

            for filename in stale {
                match store.delete(&filename).await {
                    Ok(()) => {
                        removed += 1;
                        tracing::info!(filename = %filename, "Cleaned up old file");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, filename = %filename, "Cleanup sweep failed to delete file");
                    }
                }
            }
        }

        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::LocalFileStore;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_sweep_removes_stale_files_from_all_stores() {
        let dir_a = tempdir().unwrap();
        let dir_b = tempdir().unwrap();
        let store_a = Arc::new(LocalFileStore::new(dir_a.path()).await.unwrap());
        let store_b = Arc::new(LocalFileStore::new(dir_b.path()).await.unwrap());

        store_a.put("stale_a.png", vec![1]).await.unwrap();
        store_b.put("stale_b.png", vec![2]).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let sweeper = CleanupSweeper::new(
            vec![store_a.clone(), store_b.clone()],
            Duration::from_millis(1),
        );
        let removed = sweeper.sweep().await;

        assert_eq!(removed, 2);
        assert!(!store_a.exists("stale_a.png").await.unwrap());
        assert!(!store_b.exists("stale_b.png").await.unwrap());
    }

    #[tokio::test]
    async fn test_sweep_keeps_fresh_files() {
        let dir = tempdir().unwrap();
        let store = Arc::new(LocalFileStore::new(dir.path()).await.unwrap());

        store.put("fresh.png", vec![1]).await.unwrap();

        let sweeper = CleanupSweeper::new(vec![store.clone()], Duration::from_secs(3600));
        let removed = sweeper.sweep().await;

        assert_eq!(removed, 0);
        assert!(store.exists("fresh.png").await.unwrap());
    }
}
