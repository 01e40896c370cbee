//! Destination placement for media files.
//!
//! Given a file, the catalog, and the library folders, decide which folder and
//! which directory inside it the file belongs in. Files of a series are kept
//! next to their siblings; new series go into a directory named after the
//! series inside the default drop destination. See [`resolve_destination`].

pub mod error;
pub mod fs;
mod resolve;

pub use crate::resolve::{DEFAULT_IO_TIMEOUT, Destination, PlacementCandidate, PlacementOptions, resolve_destination};
