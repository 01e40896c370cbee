use crate::source::Source;
use std::path::{Path, PathBuf};

/// Where a physical copy of a file lives: a root folder plus a path relative
/// to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileLocation {
    pub folder_id: u64,
    /// Path of the file relative to the folder root, including the file name
    pub relative_path: PathBuf,
}
impl FileLocation {
    pub fn new(folder_id: u64, relative_path: impl Into<PathBuf>) -> Self {
        Self {
            folder_id,
            relative_path: relative_path.into(),
        }
    }

    /// The directory containing the file, relative to the folder root.
    /// Files at the root of a folder return an empty path.
    pub fn relative_directory(&self) -> &Path {
        self.relative_path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// The decoded video stream of a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoStream {
    pub width: u32,
    pub height: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bit_depth: Option<u8>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub codec: Option<String>,
}

/// The release group responsible for a catalog file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReleaseGroup {
    pub id: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub short_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub long_name: String,
}

/// Catalog information about a released file. Only present when the local
/// file was matched against the catalog by its hash.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogFileView {
    pub id: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub group: Option<ReleaseGroup>,
    /// Incremented by the release group for every re-release (v2, v3...)
    #[cfg_attr(feature = "serde", serde(default = "default_version"))]
    pub version: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub source: Source,
    #[cfg_attr(feature = "serde", serde(default))]
    pub censored: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub deprecated: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub comment: String,
    /// File name as published by the release group
    #[cfg_attr(feature = "serde", serde(default))]
    pub original_file_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub audio_languages: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub subtitle_languages: Vec<String>,
}
#[cfg(feature = "serde")]
fn default_version() -> u32 {
    1
}
impl CatalogFileView {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            group: None,
            version: 1,
            source: Source::Unknown,
            censored: false,
            deprecated: false,
            comment: String::new(),
            original_file_name: None,
            audio_languages: vec![],
            subtitle_languages: vec![],
        }
    }

    /// Group ID, where `0` stands for an unknown group.
    pub fn group_id(&self) -> u64 {
        self.group.as_ref().map(|g| g.id).unwrap_or(0)
    }
}

/// A physical file held in one or more local folders.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileView {
    pub id: u64,
    /// Current file name on disk, including the extension
    pub file_name: String,
    /// Content hash used for catalog matching (ED2K)
    pub hash: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub crc32: Option<String>,
    pub size: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub video: Option<VideoStream>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub audio_codecs: Vec<String>,
    /// Audio languages found in the media container
    #[cfg_attr(feature = "serde", serde(default))]
    pub audio_languages: Vec<String>,
    /// Subtitle languages found in the media container
    #[cfg_attr(feature = "serde", serde(default))]
    pub subtitle_languages: Vec<String>,
    /// The user linked this file to its episodes by hand
    #[cfg_attr(feature = "serde", serde(default))]
    pub manually_linked: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub locations: Vec<FileLocation>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub catalog: Option<CatalogFileView>,
}
impl FileView {
    pub fn new(id: u64, file_name: impl Into<String>, hash: impl Into<String>, size: u64) -> Self {
        Self {
            id,
            file_name: file_name.into(),
            hash: hash.into(),
            crc32: None,
            size,
            video: None,
            audio_codecs: vec![],
            audio_languages: vec![],
            subtitle_languages: vec![],
            manually_linked: false,
            locations: vec![],
            catalog: None,
        }
    }

    pub fn with_location(mut self, location: FileLocation) -> Self {
        self.locations.push(location);
        self
    }

    pub fn with_catalog(mut self, catalog: impl Into<Option<CatalogFileView>>) -> Self {
        self.catalog = catalog.into();
        self
    }

    pub fn with_video(mut self, video: impl Into<Option<VideoStream>>) -> Self {
        self.video = video.into();
        self
    }

    /// Subtitle languages, preferring what the catalog knows over what was
    /// read from the container.
    pub fn subtitle_tracks(&self) -> &[String] {
        match &self.catalog {
            Some(catalog) => &catalog.subtitle_languages,
            None => &self.subtitle_languages,
        }
    }

    /// Audio languages, preferring what the catalog knows over what was read
    /// from the container.
    pub fn audio_tracks(&self) -> &[String] {
        match &self.catalog {
            Some(catalog) => &catalog.audio_languages,
            None => &self.audio_languages,
        }
    }

    /// File extension (without the dot) of the current file name.
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.file_name).extension().and_then(|e| e.to_str()).filter(|e| !e.is_empty())
    }
}
