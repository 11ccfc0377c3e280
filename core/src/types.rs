use std::io;
use thiserror::Error;

use crate::image::DecodeError;

/// Unified error for the whole extract -> build -> emit pipeline.
/// - `From<T>` impls enable `?` across stages.
/// - Every variant is fatal; there is no retry or partial-success mode.
#[derive(Debug, Error)]
pub enum BootImageError {
    /// Wrong command-line arity or an unusable configuration value.
    #[error("{0}")]
    Usage(String),

    /// File open/read or output stream write failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Source could not be parsed as an ELF executable.
    #[error("malformed executable: {0}")]
    Malformed(String),

    /// A 64-bit value from the source does not fit the 32-bit wire format.
    #[error("{field} {value:#x} does not fit in 32 bits")]
    FieldOverflow { field: &'static str, value: u64 },

    /// Declared segment size disagrees with the payload length.
    #[error("segment size {declared} does not match payload length {actual}")]
    SegmentSizeMismatch { declared: u32, actual: usize },

    /// Self-verification of a built image failed.
    #[error("image verification failed: {0}")]
    Decode(#[from] DecodeError),
}

impl From<goblin::error::Error> for BootImageError {
    fn from(e: goblin::error::Error) -> Self {
        BootImageError::Malformed(e.to_string())
    }
}

impl BootImageError {
    /// Process exit status: 1 for usage errors, 2 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            BootImageError::Usage(_) => 1,
            _ => 2,
        }
    }

    /// True for errors caused by the content of the source executable.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            BootImageError::Malformed(_)
                | BootImageError::FieldOverflow { .. }
                | BootImageError::SegmentSizeMismatch { .. }
        )
    }
}

pub type Result<T, E = BootImageError> = std::result::Result<T, E>;
