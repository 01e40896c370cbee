//! Placement Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction. The display strings of the first three kinds are shown
//! to users as-is.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A placement error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for placement operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file is not cross-referenced with any episode.
    #[display("No xrefs")]
    NoCrossReferences,
    /// The file's show has no local series.
    #[display("Series not Found")]
    SeriesNotFound,
    /// Neither a sibling's folder nor a default destination is usable.
    #[display("Unable to resolve a destination")]
    NoDestination,
    /// The file has no location inside a known folder.
    #[display("file {_0} has no location in a known folder")]
    NoLocation(#[error(not(source))] u64),
    /// Existence or free-space query failed
    #[display("filesystem query failed: {}", _0.display())]
    Filesystem(#[error(not(source))] PathBuf),
    /// Existence or free-space query did not answer in time
    #[display("filesystem query timed out: {}", _0.display())]
    Timeout(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Filesystem(_) | Self::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ErrorKind::NoCrossReferences, "No xrefs", false)]
    #[case(ErrorKind::SeriesNotFound, "Series not Found", false)]
    #[case(ErrorKind::NoDestination, "Unable to resolve a destination", false)]
    #[case(ErrorKind::Timeout(PathBuf::from("/mnt/anime")), "filesystem query timed out: /mnt/anime", true)]
    fn test_error_kinds(#[case] kind: ErrorKind, #[case] message: &str, #[case] retryable: bool) {
        assert_eq!(kind.to_string(), message);
        assert_eq!(kind.is_retryable(), retryable);
    }
}
