//! Lumen Storage Library
//!
//! Flat-directory file storage behind the [FileStore] trait. The directory
//! listing is the catalog: there is no index file or database, and per-file
//! timestamps drive the retention sweep.

mod cleanup;
mod local;
mod traits;

pub use cleanup::CleanupSweeper;
pub use local::LocalFileStore;
pub use traits::{DirStats, FileStore, StorageError, StorageResult};
