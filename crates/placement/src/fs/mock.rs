//! In-memory filesystem for testing.

use crate::error::{ErrorKind, Result};
use crate::fs::Filesystem;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// In-memory [`Filesystem`] made of volumes and the directories on them.
///
/// A path belongs to the volume of the longest registered directory it is
/// inside of. Paths can also be set up to fail or to never answer, for
/// exercising error and timeout handling.
///
/// # Examples
///
/// ```
/// use shelf_placement::fs::{Filesystem, MockFilesystem};
/// use std::path::Path;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let fs = MockFilesystem::default()
///     .with_volume(1, 1_000)
///     .with_directory("/media/anime", 1)
///     .with_directory("/media/anime/Mushishi", 1);
///
/// assert!(fs.is_dir(Path::new("/media/anime/Mushishi")).await?);
/// assert_eq!(fs.available_space(Path::new("/media/anime")).await?, 1_000);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockFilesystem {
    volumes: HashMap<u64, u64>,
    directories: HashMap<PathBuf, u64>,
    failing: HashSet<PathBuf>,
    hanging: HashSet<PathBuf>,
}

impl MockFilesystem {
    /// Adds a volume with the given number of free bytes.
    pub fn with_volume(mut self, volume: u64, available: u64) -> Self {
        self.volumes.insert(volume, available);
        self
    }

    pub fn with_directory(mut self, path: impl Into<PathBuf>, volume: u64) -> Self {
        self.directories.insert(path.into(), volume);
        self
    }

    /// Every query touching `path` fails.
    pub fn failing(mut self, path: impl Into<PathBuf>) -> Self {
        self.failing.insert(path.into());
        self
    }

    /// Every query touching `path` never completes.
    pub fn hanging(mut self, path: impl Into<PathBuf>) -> Self {
        self.hanging.insert(path.into());
        self
    }

    async fn check(&self, path: &Path) -> Result<()> {
        if self.hanging.contains(path) {
            std::future::pending::<()>().await;
        }
        if self.failing.contains(path) {
            exn::bail!(ErrorKind::Filesystem(path.to_path_buf()));
        }
        Ok(())
    }

    fn volume(&self, path: &Path) -> Result<u64> {
        self.directories
            .iter()
            .filter(|(dir, _)| path.starts_with(dir))
            .max_by_key(|(dir, _)| dir.components().count())
            .map(|(_, volume)| *volume)
            .ok_or_else(|| exn::Exn::from(ErrorKind::Filesystem(path.to_path_buf())))
    }
}

#[async_trait]
impl Filesystem for MockFilesystem {
    async fn is_dir(&self, path: &Path) -> Result<bool> {
        self.check(path).await?;
        Ok(self.directories.contains_key(path))
    }

    async fn available_space(&self, path: &Path) -> Result<u64> {
        self.check(path).await?;
        let volume = self.volume(path)?;
        Ok(self.volumes.get(&volume).copied().unwrap_or(u64::MAX))
    }

    async fn same_root(&self, a: &Path, b: &Path) -> Result<bool> {
        self.check(a).await?;
        self.check(b).await?;
        Ok(self.volume(a)? == self.volume(b)?)
    }
}
