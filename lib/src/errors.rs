use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type returned from functions that can have our `Error`s.
pub type Result<T, E = BacklightError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BacklightError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("the control file path '{}' exceeds the platform path length limit", .0.display())]
    PathTooLong(PathBuf),

    #[error("failed to open '{}': {source}", .path.display())]
    OpenFailed { path: PathBuf, source: io::Error },

    #[error("failed to close the file handle for '{}': {source}", .path.display())]
    CloseFailed { path: PathBuf, source: io::Error },

    #[error("failed to read a number from '{0}'")]
    ParseFailed(String),

    #[error("failed to write to '{}': {source}", .path.display())]
    WriteFailed { path: PathBuf, source: io::Error },

    #[error("the device reported a brightness value outside its valid range: {0}")]
    OutOfRange(i64),

    #[error("cannot set the brightness percentage to {0} (expected a value between 0 and 100)")]
    InvalidInput(f64),

    #[error("{0}")]
    Config(String),
}
