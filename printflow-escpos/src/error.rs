//! Error types for stream encoding

use thiserror::Error;

/// Encoding error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// A character in the stream has no single-byte representation
    #[error("character {ch:?} at index {index} exceeds the single-byte range")]
    CharOutOfRange { ch: char, index: usize },

    /// The payload would be empty
    #[error("empty payload")]
    EmptyPayload,
}

/// Result type for encoding operations
pub type EscposResult<T> = Result<T, EncodeError>;
