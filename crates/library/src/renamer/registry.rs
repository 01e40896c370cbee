use crate::error::{ErrorKind, Result};
use crate::renamer::Renamer;
use shelf_models::{Catalog, FileView};
use shelf_placement::Destination;
use shelf_placement::fs::Filesystem;
use shelf_script::RenameContext;

/// Registered renaming strategies, in registration order.
///
/// Operations try the preferred strategy first. When `defer_on_error` is set,
/// a failing strategy hands over to the next one and only the last failure is
/// returned; otherwise the first failure is returned as-is.
pub struct Renamers {
    renamers: Vec<Box<dyn Renamer>>,
    defer_on_error: bool,
}
impl Renamers {
    pub fn new(defer_on_error: bool) -> Self {
        Self {
            renamers: vec![],
            defer_on_error,
        }
    }

    pub fn with(mut self, renamer: impl Renamer + 'static) -> Self {
        self.renamers.push(Box::new(renamer));
        self
    }

    pub fn ids(&self) -> Vec<&str> {
        self.renamers.iter().map(|r| r.id()).collect()
    }

    /// All strategies, with `strategy` moved to the front.
    pub fn select(&self, strategy: &str) -> Vec<&dyn Renamer> {
        let (mut selected, rest): (Vec<&dyn Renamer>, Vec<&dyn Renamer>) =
            self.renamers.iter().map(|r| &**r).partition(|r| r.id() == strategy);
        if selected.is_empty() {
            tracing::warn!(strategy, available = ?self.ids(), "Unknown renaming strategy; using registration order");
        }
        selected.extend(rest);
        selected
    }

    pub async fn rename(&self, strategy: &str, ctx: &RenameContext<'_>) -> Result<String> {
        let mut failure = None;
        for renamer in self.select(strategy) {
            match renamer.rename(ctx).await {
                Ok(name) => return Ok(name),
                Err(e) if self.defer_on_error => {
                    tracing::warn!(renamer = renamer.id(), error = %*e, "Renaming failed; deferring to next strategy");
                    failure = Some(e);
                },
                Err(e) => return Err(e),
            }
        }
        Err(failure.unwrap_or_else(|| exn::Exn::from(ErrorKind::NoRenamer(strategy.to_string()))))
    }

    pub async fn destination(
        &self,
        strategy: &str,
        file: &FileView,
        catalog: &dyn Catalog,
        fs: &dyn Filesystem,
    ) -> Result<Destination> {
        let mut failure = None;
        for renamer in self.select(strategy) {
            match renamer.destination(file, catalog, fs).await {
                Ok(destination) => return Ok(destination),
                Err(e) if self.defer_on_error => {
                    tracing::warn!(renamer = renamer.id(), error = %*e, "Placement failed; deferring to next strategy");
                    failure = Some(e);
                },
                Err(e) => return Err(e),
            }
        }
        Err(failure.unwrap_or_else(|| exn::Exn::from(ErrorKind::NoRenamer(strategy.to_string()))))
    }
}
