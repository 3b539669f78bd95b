//! Error types for image sorting

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for image sorting operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for image sorting
///
/// Every variant aborts the current run. Renames that already happened are
/// left in place.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory traversal error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
