//! Library Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction. Failures from the script and placement crates are
//! raised into [`ErrorKind::Rename`] and [`ErrorKind::Placement`], carrying
//! their message so it can be shown to users unchanged.

use derive_more::{Display, Error};
use shelf_placement::error::Error as PlacementError;
use shelf_script::error::Error as ScriptError;
use std::path::PathBuf;

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The strategy has no script to run.
    #[display("no renaming script is available")]
    ScriptUnavailable,
    /// The script file could not be read.
    #[display("unable to read script {}", _0.display())]
    ScriptLoad(#[error(not(source))] PathBuf),
    /// The file is not linked to any episode.
    #[display("file has no linked episodes")]
    NoEpisodes,
    /// The file's episodes point at a show the catalog does not have.
    #[display("show {_0} not found")]
    ShowNotFound(#[error(not(source))] u64),
    /// The script failed to produce a name.
    #[display("{_0}")]
    Rename(#[error(not(source))] String),
    /// No destination could be resolved.
    #[display("{_0}")]
    Placement(#[error(not(source))] String),
    /// No strategy is registered.
    #[display("no renamer available for strategy `{_0}`")]
    NoRenamer(#[error(not(source))] String),
    /// Planning a single file failed, for the given reason.
    #[display("unable to plan file {file_id}: {reason}")]
    Plan { file_id: u64, reason: String },
}
impl ErrorKind {
    /// Raises a script error into a library error, keeping the script's
    /// `Exn` frame as a child in the error tree.
    #[track_caller]
    pub fn rename(err: ScriptError) -> Error {
        let message = (*err).to_string();
        err.raise(ErrorKind::Rename(message))
    }

    /// Raises a placement error into a library error, keeping the placement
    /// `Exn` frame as a child in the error tree.
    #[track_caller]
    pub fn placement(err: PlacementError) -> Error {
        let message = (*err).to_string();
        err.raise(ErrorKind::Placement(message))
    }

    /// Raises the failure to plan one file, keeping its reason.
    #[track_caller]
    pub fn plan(file_id: u64, err: Error) -> Error {
        let reason = (*err).to_string();
        err.raise(ErrorKind::Plan { file_id, reason })
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ScriptLoad(_))
    }
}
