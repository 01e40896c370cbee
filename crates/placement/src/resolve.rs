use crate::error::{ErrorKind, Result};
use crate::fs::Filesystem;
use exn::ResultExt;
use shelf_models::{Catalog, EpisodeView, FileLocation, FileView, FolderView};
use shelf_script::sanitize_name;
use std::cmp::Ordering;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::instrument;

/// Default limit for a single filesystem query.
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementOptions {
    /// Accept folders without checking that the file fits.
    pub skip_disk_space_checks: bool,
    /// Limit for each filesystem query; `None` waits indefinitely.
    pub io_timeout: Option<Duration>,
}
impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            skip_disk_space_checks: false,
            io_timeout: Some(DEFAULT_IO_TIMEOUT),
        }
    }
}

/// Where a file should live: a library folder and a directory inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub folder: FolderView,
    pub relative_path: PathBuf,
}
impl Destination {
    /// Absolute directory the file should be moved into.
    pub fn path(&self) -> PathBuf {
        self.folder.path.join(&self.relative_path)
    }
}

/// A sibling file's location considered as a destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementCandidate {
    pub location: FileLocation,
    pub folder: FolderView,
}
impl PlacementCandidate {
    /// The sibling's directory, relative to its folder.
    pub fn relative_path(&self) -> &Path {
        self.location.relative_directory()
    }

    pub fn directory(&self) -> PathBuf {
        self.folder.path.join(self.relative_path())
    }
}

/// Newest episodes first; episodes without an air date go last.
fn by_air_date_descending(a: &EpisodeView, b: &EpisodeView) -> Ordering {
    match (a.air_date, b.air_date) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

struct Resolver<'a> {
    catalog: &'a dyn Catalog,
    fs: &'a dyn Filesystem,
    options: &'a PlacementOptions,
    file: &'a FileView,
    /// The folder the file currently lives in.
    current: FolderView,
    /// The directory the file currently lives in.
    current_directory: PathBuf,
}
impl Resolver<'_> {
    async fn query<T>(&self, path: &Path, query: impl Future<Output = Result<T>>) -> Result<T> {
        match self.options.io_timeout {
            Some(limit) => tokio::time::timeout(limit, query)
                .await
                .or_raise(|| ErrorKind::Timeout(path.to_path_buf()))?,
            None => query.await,
        }
    }

    async fn try_fits(&self, folder: &FolderView) -> Result<bool> {
        if self.options.skip_disk_space_checks {
            return Ok(true);
        }
        let same_root = self
            .query(&folder.path, self.fs.same_root(&self.current.path, &folder.path))
            .await?;
        if same_root {
            return Ok(true);
        }
        let available = self.query(&folder.path, self.fs.available_space(&folder.path)).await?;
        Ok(available >= self.file.size)
    }

    /// Whether `directory` exists and its folder has room for the file.
    /// Query failures make the folder unusable rather than failing placement.
    async fn is_usable(&self, folder: &FolderView, directory: &Path) -> bool {
        let exists = match self.query(directory, self.fs.is_dir(directory)).await {
            Ok(exists) => exists,
            Err(e) => {
                tracing::warn!(path = %directory.display(), error = %*e, "Unable to check folder; skipping");
                return false;
            },
        };
        if !exists {
            tracing::debug!(path = %directory.display(), "Folder does not exist; skipping");
            return false;
        }
        match self.try_fits(folder).await {
            Ok(true) => true,
            Ok(false) => {
                tracing::debug!(folder = folder.id, size = self.file.size, "Not enough free space; skipping");
                false
            },
            Err(e) => {
                tracing::warn!(folder = folder.id, error = %*e, "Unable to check free space; skipping");
                false
            },
        }
    }

    async fn default_destination(&self) -> Option<FolderView> {
        for folder in self.catalog.folders().into_iter().filter(FolderView::is_default_destination) {
            if self.is_usable(&folder, &folder.path).await {
                return Some(folder);
            }
        }
        None
    }

    /// First on-disk location of `sibling`, if every one of its locations is
    /// in a folder excluded from placement. Siblings stored anywhere else are
    /// not considered.
    fn candidate(&self, sibling: &FileView) -> Option<PlacementCandidate> {
        let excluded_only = sibling.locations.iter().all(|location| {
            self.catalog
                .folder(location.folder_id)
                .is_some_and(|folder| folder.is_excluded_from_placement)
        });
        if !excluded_only {
            tracing::debug!(sibling = sibling.id, "Sibling is not only in excluded folders; skipping");
            return None;
        }
        let location = sibling.locations.first()?;
        let folder = self.catalog.folder(location.folder_id)?;
        Some(PlacementCandidate {
            location: location.clone(),
            folder,
        })
    }

    async fn from_siblings(&self, episodes: Vec<EpisodeView>) -> Option<Destination> {
        for episode in episodes {
            if self.catalog.shows_for_episode(episode.id).len() > 1 {
                tracing::debug!(episode = episode.id, "Skipping crossover episode");
                continue;
            }
            for sibling in self.catalog.files_for_episode(episode.id) {
                if sibling.hash.eq_ignore_ascii_case(&self.file.hash) {
                    continue;
                }
                let Some(candidate) = self.candidate(&sibling) else {
                    continue;
                };
                let directory = candidate.directory();
                if directory == self.current_directory {
                    continue;
                }
                tracing::debug!(sibling = sibling.id, path = %directory.display(), "Considering sibling location");
                if self.is_usable(&candidate.folder, &directory).await {
                    return Some(Destination {
                        relative_path: candidate.relative_path().to_path_buf(),
                        folder: candidate.folder,
                    });
                }
            }
        }
        None
    }
}

/// Chooses the folder, and the directory inside it, that `file` should be
/// moved to.
///
/// Files of one series are kept together: the newest sibling episode with a
/// file stored only in excluded folders, whose first location is usable,
/// decides the destination. Without one, the
/// file goes into a directory named after the series inside the first usable
/// drop destination.
#[instrument(skip_all, fields(file_id = file.id))]
pub async fn resolve_destination(
    file: &FileView,
    catalog: &dyn Catalog,
    fs: &dyn Filesystem,
    options: &PlacementOptions,
) -> Result<Destination> {
    let (current, location) = file
        .locations
        .iter()
        .find_map(|location| Some((catalog.folder(location.folder_id)?, location)))
        .ok_or_else(|| exn::Exn::from(ErrorKind::NoLocation(file.id)))?;
    let resolver = Resolver {
        catalog,
        fs,
        options,
        file,
        current_directory: current.path.join(location.relative_directory()),
        current,
    };

    let default = resolver.default_destination().await;

    let episode = catalog
        .episodes_for_file(&file.hash)
        .into_iter()
        .next()
        .ok_or_else(|| exn::Exn::from(ErrorKind::NoCrossReferences))?;
    let series = catalog
        .series_for_show(episode.show_id)
        .ok_or_else(|| exn::Exn::from(ErrorKind::SeriesNotFound))?;

    let mut episodes = catalog.episodes_of_series(series.id);
    episodes.sort_by(by_air_date_descending);
    if let Some(destination) = resolver.from_siblings(episodes).await {
        return Ok(destination);
    }

    match default {
        Some(folder) => {
            tracing::debug!(folder = folder.id, series = %series.name, "No usable sibling; using default destination");
            Ok(Destination {
                folder,
                relative_path: PathBuf::from(sanitize_name(&series.name)),
            })
        },
        None => exn::bail!(ErrorKind::NoDestination),
    }
}
