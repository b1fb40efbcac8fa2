//! Error types for the VELA protocol

use thiserror::Error;

/// Core VELA errors
#[derive(Error, Debug)]
pub enum VelaError {
    // Decode errors
    #[error("Malformed packet: no type-tag divider found after address")]
    MalformedAddress,

    #[error("Misaligned packet: address span ends at byte {index}, not on a 4-byte boundary")]
    MisalignedPacket { index: usize },

    #[error("No NUL terminator after {0}")]
    MissingTerminator(&'static str),

    #[error("Unknown type tag '{0}'")]
    UnknownTypeTag(char),

    #[error("Nested arrays are not supported")]
    UnsupportedNestedArray,

    #[error("Buffer too short: expected {expected}, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },

    #[error("Not a bundle: header literal mismatch")]
    BadBundleHeader,

    #[error("Unmatched array delimiter in type-tag string")]
    UnmatchedArrayDelimiter,

    // Transport errors
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type for VELA operations
pub type VelaResult<T> = Result<T, VelaError>;
