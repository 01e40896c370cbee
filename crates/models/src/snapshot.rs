//! In-memory [`Catalog`] built from plain vectors.
//!
//! Used by the command-line front end (deserialized from JSON with the `serde`
//! feature) and throughout the workspace's tests.

use crate::{Catalog, CrossReference, EpisodeView, FileView, FolderView, SeriesView, ShowView};
use std::collections::BTreeSet;

/// A frozen copy of everything the engine may ask the metadata store for.
///
/// # Examples
///
/// ```
/// use shelf_models::{Catalog, CrossReference, EpisodeKind, EpisodeView, FileView, ShowKind, ShowView, Snapshot};
///
/// let snapshot = Snapshot::default()
///     .with_show(ShowView::new(1, ShowKind::Tv))
///     .with_episode(EpisodeView::new(10, 1, EpisodeKind::Normal, 1))
///     .with_file(FileView::new(100, "ep1.mkv", "abcdef", 1024))
///     .with_cross_reference(CrossReference::new("abcdef", 10, 1));
///
/// assert_eq!(snapshot.episodes_for_file("abcdef").len(), 1);
/// assert_eq!(snapshot.shows_for_episode(10), vec![1]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Snapshot {
    pub shows: Vec<ShowView>,
    pub series: Vec<SeriesView>,
    pub episodes: Vec<EpisodeView>,
    pub files: Vec<FileView>,
    pub cross_references: Vec<CrossReference>,
    pub folders: Vec<FolderView>,
}
impl Snapshot {
    pub fn with_show(mut self, show: ShowView) -> Self {
        self.shows.push(show);
        self
    }

    pub fn with_series(mut self, series: SeriesView) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_episode(mut self, episode: EpisodeView) -> Self {
        self.episodes.push(episode);
        self
    }

    pub fn with_file(mut self, file: FileView) -> Self {
        self.files.push(file);
        self
    }

    pub fn with_cross_reference(mut self, xref: CrossReference) -> Self {
        self.cross_references.push(xref);
        self
    }

    pub fn with_folder(mut self, folder: FolderView) -> Self {
        self.folders.push(folder);
        self
    }

    pub fn file(&self, file_id: u64) -> Option<&FileView> {
        self.files.iter().find(|f| f.id == file_id)
    }

    fn episode(&self, episode_id: u64) -> Option<&EpisodeView> {
        self.episodes.iter().find(|e| e.id == episode_id)
    }
}

impl Catalog for Snapshot {
    fn show(&self, show_id: u64) -> Option<ShowView> {
        self.shows.iter().find(|s| s.id == show_id).cloned()
    }

    fn series_for_show(&self, show_id: u64) -> Option<SeriesView> {
        self.series.iter().find(|s| s.show_id == show_id).cloned()
    }

    fn episodes_of_series(&self, series_id: u64) -> Vec<EpisodeView> {
        let Some(series) = self.series.iter().find(|s| s.id == series_id) else {
            return vec![];
        };
        self.episodes.iter().filter(|e| e.show_id == series.show_id).cloned().collect()
    }

    fn episodes_for_file(&self, file_hash: &str) -> Vec<EpisodeView> {
        let mut episodes: Vec<EpisodeView> = self
            .cross_references
            .iter()
            .filter(|x| x.file_hash.eq_ignore_ascii_case(file_hash))
            .filter_map(|x| self.episode(x.episode_id))
            .cloned()
            .collect();
        // Multi-episode files list their episodes in order, so the first and
        // last entries bound the range.
        episodes.sort_by_key(|e| (e.show_id, e.number));
        episodes.dedup_by_key(|e| e.id);
        episodes
    }

    fn files_for_episode(&self, episode_id: u64) -> Vec<FileView> {
        let hashes: BTreeSet<String> = self
            .cross_references
            .iter()
            .filter(|x| x.episode_id == episode_id)
            .map(|x| x.file_hash.to_ascii_lowercase())
            .collect();
        self.files
            .iter()
            .filter(|f| hashes.contains(&f.hash.to_ascii_lowercase()))
            .cloned()
            .collect()
    }

    fn shows_for_episode(&self, episode_id: u64) -> Vec<u64> {
        let shows: BTreeSet<u64> =
            self.cross_references.iter().filter(|x| x.episode_id == episode_id).map(|x| x.show_id).collect();
        shows.into_iter().collect()
    }

    fn folders(&self) -> Vec<FolderView> {
        self.folders.clone()
    }
}
