use shelf_models::{EpisodeView, FileView, ShowView};

/// Default truncation threshold for episode titles.
pub const DEFAULT_MAX_EPISODE_TITLE_LENGTH: usize = 33;

/// Everything a script may look at while naming one file.
#[derive(Debug, Clone, Copy)]
pub struct RenameContext<'a> {
    pub file: &'a FileView,
    /// Linked episodes in order; multi-episode files have more than one.
    pub episodes: &'a [EpisodeView],
    /// The show owning the first episode.
    pub show: &'a ShowView,
}
impl<'a> RenameContext<'a> {
    pub fn new(file: &'a FileView, episodes: &'a [EpisodeView], show: &'a ShowView) -> Self {
        Self { file, episodes, show }
    }

    pub fn first_episode(&self) -> Option<&'a EpisodeView> {
        self.episodes.first()
    }

    pub fn last_episode(&self) -> Option<&'a EpisodeView> {
        self.episodes.last()
    }
}

/// Tunables for name synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenameOptions {
    /// Episode titles longer than this many characters are cut to
    /// `max - 1` characters followed by an ellipsis.
    pub max_episode_title_length: usize,
}
impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            max_episode_title_length: DEFAULT_MAX_EPISODE_TITLE_LENGTH,
        }
    }
}
