//! Error types for QR code encoding.

use thiserror::Error;

/// Errors that can occur while encoding a QR code.
///
/// Ways to handle a [`QrError::Capacity`] error:
///
/// - Shorten the text or binary data.
/// - Propagate the error upward to the caller/user.
///
/// [`QrError::Range`] signals a misused [`BitBuffer`](crate::BitBuffer) and is
/// never produced by the encoder for valid input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrError {
    /// The data does not fit in the selected version (or in any supported version).
    #[error("content is too long: {len} bytes ({max} bytes maximum)")]
    Capacity { len: usize, max: usize },

    /// A bit index or bit width was out of range.
    #[error("bit range error: {what} {value} out of range (limit {limit})")]
    Range {
        what: &'static str,
        value: usize,
        limit: usize,
    },
}

/// Result type for QR code encoding.
pub type Result<T> = std::result::Result<T, QrError>;
