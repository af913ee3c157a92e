//! Error type for 3DS parsing.

use thiserror::Error;

/// Errors that can occur while reading a 3DS document.
#[derive(Error, Debug)]
pub enum TdsError {
    /// The file could not be read from disk.
    #[error("failed to read 3DS file: {0}")]
    Io(#[from] std::io::Error),

    /// The top-level chunk is not the 3DS magic.
    #[error("not a 3DS file: top chunk id {found:#06x}, expected 0x4d4d")]
    BadMagic {
        /// Chunk id found at the start of the data.
        found: u16,
    },

    /// A read ran past the end of the data or the enclosing chunk.
    #[error("truncated 3DS data: needed {needed} bytes at offset {offset}, {available} available")]
    Truncated {
        /// Absolute offset of the failed read.
        offset: usize,
        /// Bytes the read required.
        needed: usize,
        /// Bytes remaining.
        available: usize,
    },

    /// A chunk header declares a length smaller than the header itself or
    /// larger than its container.
    #[error("chunk {id:#06x} declares invalid length {length}")]
    BadChunkLength {
        /// Offending chunk id.
        id: u16,
        /// Declared length in bytes.
        length: u32,
    },

    /// A string field is missing its NUL terminator.
    #[error("unterminated string at offset {offset}")]
    UnterminatedString {
        /// Absolute offset where the string starts.
        offset: usize,
    },
}
