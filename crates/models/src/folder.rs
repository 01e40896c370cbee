use std::path::PathBuf;

/// A configured root folder (an "import folder") and its role flags.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FolderView {
    pub id: u64,
    /// Absolute path to the folder root
    pub path: PathBuf,
    /// New files are picked up from here
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_drop_source: bool,
    /// Renamed files may be moved here when no better place is known
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_drop_destination: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_watched: bool,
    /// Excluded-type folder; only files stored purely in such folders guide
    /// where their siblings are placed
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_excluded_from_placement: bool,
}
impl FolderView {
    pub fn new(id: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            id,
            path: path.into(),
            is_drop_source: false,
            is_drop_destination: false,
            is_watched: false,
            is_excluded_from_placement: false,
        }
    }

    pub fn drop_source(mut self) -> Self {
        self.is_drop_source = true;
        self
    }

    pub fn drop_destination(mut self) -> Self {
        self.is_drop_destination = true;
        self
    }

    pub fn watched(mut self) -> Self {
        self.is_watched = true;
        self
    }

    pub fn excluded_from_placement(mut self) -> Self {
        self.is_excluded_from_placement = true;
        self
    }

    /// Whether this folder can receive files that have no better home.
    pub fn is_default_destination(&self) -> bool {
        self.is_drop_destination && !self.is_drop_source
    }
}
