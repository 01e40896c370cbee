use crate::error::{ErrorKind, Result};
use crate::fs::Filesystem;
use async_trait::async_trait;
use exn::ResultExt;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Queries the local filesystem through `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    #[cfg(unix)]
    async fn volume(path: &Path) -> Result<u64> {
        use std::os::unix::fs::MetadataExt;
        let metadata = fs::metadata(path).await.or_raise(|| ErrorKind::Filesystem(path.to_path_buf()))?;
        Ok(metadata.dev())
    }

    /// Without device numbers, paths on the same drive or share are assumed to
    /// share a volume.
    #[cfg(not(unix))]
    fn prefix(path: &Path) -> Option<std::path::Component<'_>> {
        path.components().next().filter(|c| matches!(c, std::path::Component::Prefix(_)))
    }
}

#[async_trait]
impl Filesystem for LocalFilesystem {
    async fn is_dir(&self, path: &Path) -> Result<bool> {
        match fs::metadata(path).await {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).or_raise(|| ErrorKind::Filesystem(path.to_path_buf())),
        }
    }

    async fn available_space(&self, path: &Path) -> Result<u64> {
        let owned: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || fs4::available_space(owned))
            .await
            .or_raise(|| ErrorKind::Filesystem(path.to_path_buf()))?
            .or_raise(|| ErrorKind::Filesystem(path.to_path_buf()))
    }

    #[cfg(unix)]
    async fn same_root(&self, a: &Path, b: &Path) -> Result<bool> {
        Ok(Self::volume(a).await? == Self::volume(b).await?)
    }

    #[cfg(not(unix))]
    async fn same_root(&self, a: &Path, b: &Path) -> Result<bool> {
        Ok(Self::prefix(a) == Self::prefix(b))
    }
}
