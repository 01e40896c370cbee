//! Renaming strategies.
//!
//! A [`Renamer`] turns a file and its catalog metadata into a new file name and
//! a destination folder. Strategies are registered in [`Renamers`], which
//! tries the configured one first and, when allowed, falls back to the others.

mod legacy;
mod registry;

pub use self::legacy::{LEGACY_STRATEGY, LegacyRenamer};
pub use self::registry::Renamers;
use crate::error::Result;
use async_trait::async_trait;
use shelf_models::{Catalog, FileView};
use shelf_placement::Destination;
use shelf_placement::fs::Filesystem;
use shelf_script::RenameContext;

#[async_trait]
pub trait Renamer: Send + Sync {
    /// Strategy identifier, as used in configuration.
    fn id(&self) -> &str;

    /// New file name for the file in `ctx`, extension included.
    async fn rename(&self, ctx: &RenameContext<'_>) -> Result<String>;

    /// Folder and directory the file should be moved to.
    async fn destination(&self, file: &FileView, catalog: &dyn Catalog, fs: &dyn Filesystem) -> Result<Destination>;
}
