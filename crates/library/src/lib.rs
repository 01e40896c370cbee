//! Renaming strategies and planning.
//!
//! A [`Context`] bundles the registered strategies with the preferred one.
//! [`plan::plan_file`] decides the new name and destination of one file;
//! [`plan::plan`] does so for many files concurrently.

pub mod error;
pub mod plan;
pub mod renamer;

use crate::error::Result;
use crate::renamer::{LegacyRenamer, Renamers};
use shelf_config::Config;
use tracing::instrument;

/// Files planned at the same time by [`plan::plan`].
pub const MAX_PLAN_CONCURRENCY: usize = 100;

pub struct Context {
    pub renamers: Renamers,
    /// Identifier of the strategy tried first.
    pub strategy: String,
}
impl Context {
    pub fn new(renamers: Renamers, strategy: impl Into<String>) -> Self {
        Self {
            renamers,
            strategy: strategy.into(),
        }
    }

    /// Registers the built-in strategies, configured from `config`.
    ///
    /// The configured script is read and compiled here, so a missing script
    /// file fails early. Without a configured script the legacy strategy is
    /// still registered, but every rename through it fails.
    #[instrument(skip_all, fields(strategy = %config.rename.strategy))]
    pub async fn from_config(config: &Config) -> Result<Self> {
        let script = match &config.rename.script {
            Some(path) => Some(LegacyRenamer::load_script(path, &config.rename.script_name).await?),
            None => None,
        };
        let legacy = LegacyRenamer::new(script)
            .with_rename_options(config.rename.options())
            .with_placement_options(config.placement.options());
        let renamers = Renamers::new(config.rename.defer_on_error).with(legacy);
        Ok(Self::new(renamers, config.rename.strategy.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use shelf_models::{EpisodeKind, EpisodeView, FileView, ShowKind, ShowView};
    use shelf_script::RenameContext;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_from_config_loads_script() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("default.script");
        std::fs::write(&path, "DO ADD 'Episode %enr'\n").unwrap();
        let mut config = Config::default();
        config.rename.script = Some(path);

        let ctx = Context::from_config(&config).await.unwrap();
        assert_eq!(ctx.strategy, "legacy");
        assert_eq!(ctx.renamers.ids(), ["legacy"]);

        let file = FileView::new(1, "raw.mkv", "aa", 10);
        let episodes = [EpisodeView::new(1, 1, EpisodeKind::Normal, 4)];
        let show = ShowView::new(1, ShowKind::Tv).with_episode_counts(12, 0);
        let name = ctx
            .renamers
            .rename(&ctx.strategy, &RenameContext::new(&file, &episodes, &show))
            .await
            .unwrap();
        assert_eq!(name, "Episode 04.mkv");
    }

    #[tokio::test]
    async fn test_from_config_missing_script() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.rename.script = Some(dir.path().join("missing.script"));
        let err = Context::from_config(&config).await.err().unwrap();
        assert!(matches!(&*err, ErrorKind::ScriptLoad(_)));
    }

    #[tokio::test]
    async fn test_from_config_without_script() {
        let ctx = Context::from_config(&Config::default()).await.unwrap();
        let file = FileView::new(1, "raw.mkv", "aa", 10);
        let episodes = [EpisodeView::new(1, 1, EpisodeKind::Normal, 4)];
        let show = ShowView::new(1, ShowKind::Tv);
        let err = ctx
            .renamers
            .rename(&ctx.strategy, &RenameContext::new(&file, &episodes, &show))
            .await
            .unwrap_err();
        assert!(matches!(&*err, ErrorKind::ScriptUnavailable));
    }
}
