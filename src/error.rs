//! Error types for body decoding

use thiserror::Error;

/// Errors that can occur while reversing a content-transfer-encoding or
/// normalizing a charset.
///
/// These never escape the crate's public entry points: every decode site
/// falls back to the pre-decode value on `Err`.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Base64 payload could not be decoded
    #[error("Invalid base64 payload: {0}")]
    Base64(String),

    /// Charset label is not a known encoding
    #[error("Unknown charset label: {0}")]
    UnknownCharset(String),
}

/// Result type for decoding operations
pub type Result<T> = std::result::Result<T, DecodeError>;
