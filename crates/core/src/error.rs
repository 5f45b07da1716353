//! Error types for the ansi2pdf conversion library.

use thiserror::Error;

/// Primary error type for layout and document serialization.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid parameter: {0}")]
    InvalidParams(String),

    #[error("cannot {op} while serializer is in state {state}")]
    InvalidState { state: &'static str, op: &'static str },

    #[error("document declared {declared} pages but {written} were written")]
    PageCountMismatch { declared: usize, written: usize },

    #[error("object {objid} recorded at offset {recorded} but starts at {actual}")]
    OffsetMismatch {
        objid: u32,
        recorded: u64,
        actual: u64,
    },

    #[error("xref error: {0}")]
    Xref(String),
}

/// Convenience Result type alias for ConvertError.
pub type Result<T> = std::result::Result<T, ConvertError>;
