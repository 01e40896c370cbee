//! Shared test data: one catalog-linked, fully described file.

use crate::RenameContext;
use shelf_models::{
    CatalogFileView, EpisodeKind, EpisodeView, FileLocation, FileView, ReleaseGroup, ShowKind, ShowView, Source,
    Title, TitleKind, VideoStream,
};
use time::macros::date;

pub(crate) struct Fixture {
    pub file: FileView,
    pub episodes: Vec<EpisodeView>,
    pub show: ShowView,
}
impl Fixture {
    pub fn context(&self) -> RenameContext<'_> {
        RenameContext::new(&self.file, &self.episodes, &self.show)
    }

    /// Drops the catalog link, turning the file into a manually linked one.
    pub fn manual(mut self) -> Self {
        self.file.catalog = None;
        self.file.manually_linked = true;
        self
    }

    pub fn with_catalog(mut self, f: impl FnOnce(&mut CatalogFileView)) -> Self {
        if let Some(catalog) = self.file.catalog.as_mut() {
            f(catalog);
        }
        self
    }
}

pub(crate) fn show() -> ShowView {
    ShowView::new(42, ShowKind::Tv)
        .with_air_date(date!(2013 - 04 - 07))
        .with_title(Title::new("x-jat", TitleKind::Main, "Shingeki no Kyojin"))
        .with_title(Title::new("en", TitleKind::Official, "Attack on Titan"))
        .with_title(Title::new("ja", TitleKind::Official, "進撃の巨人"))
        .with_episode_counts(25, 8)
}

pub(crate) fn episode(number: u32) -> EpisodeView {
    EpisodeView::new(1000 + u64::from(number), 42, EpisodeKind::Normal, number)
        .with_air_date(date!(2013 - 05 - 05))
        .with_title(Title::new("x-jat", TitleKind::Official, "Kanashimi no Yoake"))
        .with_title(Title::new("en", TitleKind::Official, "First Battle"))
}

pub(crate) fn catalog_file() -> CatalogFileView {
    let mut catalog = CatalogFileView::new(99);
    catalog.group = Some(ReleaseGroup {
        id: 5,
        short_name: "Group".to_string(),
        long_name: "The Group".to_string(),
    });
    catalog.version = 2;
    catalog.source = Source::BluRay;
    catalog.original_file_name = Some("[Group] Shingeki no Kyojin - 05 [BD 1080p].mkv".to_string());
    catalog.audio_languages = vec!["japanese".to_string()];
    catalog.subtitle_languages = vec!["english".to_string()];
    catalog
}

pub(crate) fn file() -> FileView {
    let mut file = FileView::new(7, "[Group] AoT 05.mkv", "0123456789abcdef0123456789ABCDEF", 1_000_000)
        .with_video(VideoStream {
            width: 1920,
            height: 1080,
            bit_depth: Some(10),
            codec: Some("H264/AVC".to_string()),
        })
        .with_location(FileLocation::new(1, "incoming/[Group] AoT 05.mkv"))
        .with_catalog(catalog_file());
    file.crc32 = Some("9b1c2d3e".to_string());
    file.audio_codecs = vec!["AAC".to_string()];
    file
}

pub(crate) fn fixture() -> Fixture {
    Fixture {
        file: file(),
        episodes: vec![episode(5)],
        show: show(),
    }
}
