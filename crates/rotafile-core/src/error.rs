//! Error types for rotafile

use std::path::PathBuf;

/// Rotafile error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Path exists but is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Log file is not open (previous rotation failed)")]
    FileNotOpen,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for rotafile
pub type Result<T> = std::result::Result<T, Error>;
