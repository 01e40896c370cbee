use crate::error::{ErrorKind, Result};
use crate::renamer::Renamer;
use async_trait::async_trait;
use exn::ResultExt;
use shelf_models::{Catalog, FileView};
use shelf_placement::fs::Filesystem;
use shelf_placement::{Destination, PlacementOptions, resolve_destination};
use shelf_script::{RenameContext, RenameOptions, Script};
use std::path::Path;

pub const LEGACY_STRATEGY: &str = "legacy";

/// Names files with a line-based script and places them next to their
/// siblings.
#[derive(Debug, Clone, Default)]
pub struct LegacyRenamer {
    script: Option<Script>,
    rename: RenameOptions,
    placement: PlacementOptions,
}
impl LegacyRenamer {
    pub fn new(script: Option<Script>) -> Self {
        Self {
            script,
            ..Default::default()
        }
    }

    pub fn with_rename_options(mut self, options: RenameOptions) -> Self {
        self.rename = options;
        self
    }

    pub fn with_placement_options(mut self, options: PlacementOptions) -> Self {
        self.placement = options;
        self
    }

    pub fn script(&self) -> Option<&Script> {
        self.script.as_ref()
    }

    /// Reads and compiles a script file for this strategy.
    pub async fn load_script(path: &Path, name: &str) -> Result<Script> {
        let text = tokio::fs::read_to_string(path)
            .await
            .or_raise(|| ErrorKind::ScriptLoad(path.to_path_buf()))?;
        let script = Script::new(name, LEGACY_STRATEGY, &text);
        tracing::debug!(script = name, lines = script.lines().len(), "Script compiled");
        Ok(script)
    }
}

#[async_trait]
impl Renamer for LegacyRenamer {
    fn id(&self) -> &str {
        LEGACY_STRATEGY
    }

    async fn rename(&self, ctx: &RenameContext<'_>) -> Result<String> {
        let script = self.script.as_ref().ok_or_else(|| exn::Exn::from(ErrorKind::ScriptUnavailable))?;
        script.run(ctx, &self.rename).map_err(ErrorKind::rename)
    }

    async fn destination(&self, file: &FileView, catalog: &dyn Catalog, fs: &dyn Filesystem) -> Result<Destination> {
        resolve_destination(file, catalog, fs, &self.placement)
            .await
            .map_err(ErrorKind::placement)
    }
}
