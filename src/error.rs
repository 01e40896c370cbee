use derive_more::{Display, Error};
use std::path::PathBuf;

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("unable to load configuration")]
    Config,
    #[display("unable to read snapshot {}", _0.display())]
    Snapshot(#[error(not(source))] PathBuf),
    #[display("unable to set up renaming strategies")]
    Context,
    #[display("file {_0} is not in the snapshot")]
    FileNotFound(#[error(not(source))] u64),
    #[display("{_0} file(s) failed")]
    Failures(#[error(not(source))] usize),
}
