use crate::Context;
use crate::error::{ErrorKind, Result};
use exn::OptionExt;
use shelf_models::{Catalog, EpisodeView, FileView, ShowView};
use shelf_placement::Destination;
use shelf_placement::fs::Filesystem;
use shelf_script::RenameContext;
use tracing::instrument;

/// What should happen to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub file_id: u64,
    /// New file name, extension included.
    pub name: String,
    pub destination: Destination,
}
impl Plan {
    /// Full path the file would end up at.
    pub fn path(&self) -> std::path::PathBuf {
        self.destination.path().join(&self.name)
    }
}

/// Episodes of the file and the show of the first one.
fn metadata(catalog: &dyn Catalog, file: &FileView) -> Result<(Vec<EpisodeView>, ShowView)> {
    let episodes = catalog.episodes_for_file(&file.hash);
    let first = episodes.first().ok_or_raise(|| ErrorKind::NoEpisodes)?;
    let show = catalog.show(first.show_id).ok_or_raise(|| ErrorKind::ShowNotFound(first.show_id))?;
    Ok((episodes, show))
}

/// Synthesizes the new name of `file` with the context's strategies.
pub async fn rename_file(ctx: &Context, catalog: &dyn Catalog, file: &FileView) -> Result<String> {
    let (episodes, show) = metadata(catalog, file)?;
    ctx.renamers
        .rename(&ctx.strategy, &RenameContext::new(file, &episodes, &show))
        .await
}

/// Resolves where `file` should be moved to with the context's strategies.
pub async fn place_file(ctx: &Context, catalog: &dyn Catalog, fs: &dyn Filesystem, file: &FileView) -> Result<Destination> {
    ctx.renamers.destination(&ctx.strategy, file, catalog, fs).await
}

/// Computes both the new name and the destination of `file`.
#[instrument(skip_all, fields(file_id = file.id))]
pub async fn plan_file(ctx: &Context, catalog: &dyn Catalog, fs: &dyn Filesystem, file: &FileView) -> Result<Plan> {
    let name = rename_file(ctx, catalog, file).await?;
    let destination = place_file(ctx, catalog, fs, file).await?;
    tracing::debug!(name = %name, destination = %destination.path().display(), "File planned");
    Ok(Plan {
        file_id: file.id,
        name,
        destination,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renamer::{LEGACY_STRATEGY, LegacyRenamer, Renamers};
    use shelf_models::{CrossReference, EpisodeKind, FileLocation, FolderView, SeriesView, ShowKind, Snapshot, Title, TitleKind};
    use shelf_placement::fs::MockFilesystem;
    use shelf_script::Script;
    use std::path::PathBuf;

    fn context() -> Context {
        let script = Script::new("default", LEGACY_STRATEGY, "DO ADD '%ann - %enr'");
        Context::new(Renamers::new(true).with(LegacyRenamer::new(Some(script))), LEGACY_STRATEGY)
    }

    fn snapshot() -> Snapshot {
        Snapshot::default()
            .with_show(
                ShowView::new(1, ShowKind::Tv)
                    .with_title(Title::new("x-jat", TitleKind::Main, "Mushishi"))
                    .with_episode_counts(26, 0),
            )
            .with_series(SeriesView {
                id: 1,
                show_id: 1,
                name: "Mushishi".to_string(),
            })
            .with_episode(EpisodeView::new(10, 1, EpisodeKind::Normal, 3))
            .with_file(FileView::new(100, "mushishi03.mkv", "abc", 10).with_location(FileLocation::new(1, "mushishi03.mkv")))
            .with_cross_reference(CrossReference::new("abc", 10, 1))
            .with_folder(FolderView::new(1, "/incoming").drop_source())
            .with_folder(FolderView::new(2, "/anime").drop_destination())
    }

    fn fs() -> MockFilesystem {
        MockFilesystem::default()
            .with_directory("/incoming", 1)
            .with_directory("/anime", 1)
    }

    #[tokio::test]
    async fn test_plan_file() {
        let snapshot = snapshot();
        let file = snapshot.file(100).unwrap();
        let plan = plan_file(&context(), &snapshot, &fs(), file).await.unwrap();
        assert_eq!(plan.file_id, 100);
        assert_eq!(plan.name, "Mushishi - 03.mkv");
        assert_eq!(plan.destination.folder.id, 2);
        assert_eq!(plan.path(), PathBuf::from("/anime/Mushishi/Mushishi - 03.mkv"));
    }

    #[tokio::test]
    async fn test_unlinked_file() {
        let snapshot = snapshot();
        let file = FileView::new(101, "other.mkv", "def", 10);
        let err = plan_file(&context(), &snapshot, &fs(), &file).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::NoEpisodes));
    }

    #[tokio::test]
    async fn test_missing_show() {
        let mut snapshot = snapshot();
        snapshot.shows.clear();
        let file = snapshot.file(100).unwrap().clone();
        let err = rename_file(&context(), &snapshot, &file).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::ShowNotFound(1)));
    }

    #[tokio::test]
    async fn test_placement_failure() {
        let mut snapshot = snapshot();
        snapshot.series.clear();
        let file = snapshot.file(100).unwrap().clone();
        let err = place_file(&context(), &snapshot, &fs(), &file).await.unwrap_err();
        assert_eq!(*err, ErrorKind::Placement("Series not Found".to_string()));
    }
}
