//! Filesystem queries needed to judge a destination folder.
//!
//! Placement never reads, writes, or moves files. It only asks whether a
//! directory exists, how much room a volume has, and whether two paths live on
//! the same volume (moving within one volume needs no free space).

mod local;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use self::local::LocalFilesystem;
#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockFilesystem;
use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Read-only view of the filesystems holding the library folders.
///
/// # Examples
///
/// ```
/// use shelf_placement::error::Result;
/// use shelf_placement::fs::Filesystem;
/// use std::path::Path;
///
/// async fn fits(fs: &dyn Filesystem, folder: &Path, size: u64) -> Result<bool> {
///     Ok(fs.is_dir(folder).await? && fs.available_space(folder).await? >= size)
/// }
/// ```
#[async_trait]
pub trait Filesystem: Send + Sync {
    /// `false` when nothing exists at `path`, or it is not a directory.
    async fn is_dir(&self, path: &Path) -> Result<bool>;

    /// Bytes available to the current user on the volume holding `path`.
    async fn available_space(&self, path: &Path) -> Result<u64>;

    /// Whether both paths are on the same volume.
    async fn same_root(&self, a: &Path, b: &Path) -> Result<bool>;
}
