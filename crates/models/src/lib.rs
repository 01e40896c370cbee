//! Read-only views of the media catalog.
//!
//! Every type in this crate is a snapshot handed to the renaming engine for a
//! single invocation. Nothing here is ever mutated by the engine, and nothing
//! here knows how it was loaded: the surrounding metadata store builds these
//! views, or a [`Snapshot`] is deserialized from JSON for offline runs.

mod catalog;
mod episode;
pub mod error;
mod file;
mod folder;
mod show;
mod snapshot;
mod source;

pub use crate::catalog::{Catalog, CrossReference};
pub use crate::episode::{EpisodeKind, EpisodeView};
pub use crate::file::{CatalogFileView, FileLocation, FileView, ReleaseGroup, VideoStream};
pub use crate::folder::FolderView;
pub use crate::show::{SeriesView, ShowKind, ShowView, Title, TitleKind};
pub use crate::snapshot::Snapshot;
pub use crate::source::Source;

/// Normalizes user-facing enum spellings ("Blu-ray", "blu ray", "BLURAY") so
/// that [`FromStr`](std::str::FromStr) implementations only need to match
/// one form.
fn sanitize(s: impl AsRef<str>) -> String {
    s.as_ref().trim().to_lowercase().replace('/', "").replace('-', "").replace('_', "").replace(' ', "")
}
