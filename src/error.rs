use thiserror::Error;

/// Every way a compression or decompression call can fail.
#[derive(Error, Debug)]
pub enum AtError {
    /// The block handed to the transform contains the reserved sentinel byte.
    #[error("input contains the reserved sentinel byte {sentinel} at offset {offset}")]
    Validation { sentinel: u8, offset: usize },

    /// The bitstream (or transformed block) cannot be decoded with the table supplied.
    #[error("decode failed: {0}")]
    Decode(String),

    /// Payload and decode table do not belong together.
    #[error("precondition failed: {0}")]
    Precondition(String),

    #[error("invalid archive: {0}")]
    Format(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AtError>;
