//! Script Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.
//!
//! Errors raised while evaluating a single test never escape the evaluator
//! (see [`Condition::evaluate`](crate::Condition::evaluate)); the kinds below
//! that describe test failures only ever appear in `trace` logs.

use derive_more::{Display, Error};

/// A script error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for script operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A script line does not follow the `IF ... DO ...` grammar.
    #[display("invalid syntax: {_0}")]
    Syntax(#[error(not(source))] String),
    /// A test argument could not be interpreted.
    #[display("invalid test argument: {_0}")]
    InvalidArgument(#[error(not(source))] String),
    /// A test needs data that this file does not have.
    #[display("missing data: {_0}")]
    MissingData(#[error(not(source))] &'static str),
    /// The file is not linked to any episode.
    #[display("file has no linked episodes")]
    NoEpisodes,
    /// A `FAIL` action was reached.
    #[display("script aborted by a FAIL action")]
    Aborted,
    /// The script ran to completion without producing any text.
    #[display("script produced an empty name")]
    EmptyName,
    /// The current file name has no extension to carry over.
    #[display("unable to determine the file extension of {_0}")]
    MissingExtension(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // The engine is a pure function of its inputs.
        false
    }
}
