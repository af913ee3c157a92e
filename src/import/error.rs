//! Error type for the import pipeline.

use thiserror::Error;

use crate::tds::TdsError;

/// Errors produced by [`import_file`](super::import_file).
#[derive(Error, Debug)]
pub enum ImportError {
    /// The scene file could not be read from disk.
    #[error("failed to read scene file: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid 3DS data.
    #[error("failed to parse scene: {0}")]
    Format(#[from] TdsError),
}
