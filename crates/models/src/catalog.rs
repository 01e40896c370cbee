use crate::{EpisodeView, FileView, FolderView, SeriesView, ShowView};

/// Links one file (by content hash) to one episode of one show.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrossReference {
    pub file_hash: String,
    pub episode_id: u64,
    pub show_id: u64,
}
impl CrossReference {
    pub fn new(file_hash: impl Into<String>, episode_id: u64, show_id: u64) -> Self {
        Self {
            file_hash: file_hash.into(),
            episode_id,
            show_id,
        }
    }
}

/// Read-only lookups into the metadata store.
///
/// Implementations hand out owned snapshots: the engine never holds on to
/// anything between invocations, and never writes back. Lookups are
/// infallible; a missing record is simply absent.
pub trait Catalog: Send + Sync {
    fn show(&self, show_id: u64) -> Option<ShowView>;

    fn series_for_show(&self, show_id: u64) -> Option<SeriesView>;

    /// All episodes of the series' show, in catalog order.
    fn episodes_of_series(&self, series_id: u64) -> Vec<EpisodeView>;

    /// Episodes the file with the given content hash is linked to, in episode
    /// order.
    fn episodes_for_file(&self, file_hash: &str) -> Vec<EpisodeView>;

    /// Files linked to the given episode.
    fn files_for_episode(&self, episode_id: u64) -> Vec<FileView>;

    /// Distinct shows that files of this episode are cross-referenced with.
    /// More than one entry means the episode is part of a crossover.
    fn shows_for_episode(&self, episode_id: u64) -> Vec<u64>;

    fn folders(&self) -> Vec<FolderView>;

    fn folder(&self, folder_id: u64) -> Option<FolderView> {
        self.folders().into_iter().find(|f| f.id == folder_id)
    }
}
