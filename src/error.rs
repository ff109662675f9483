//! Error types for qqwry-rs
//!
//! This module defines custom error types using thiserror for better error handling.

use thiserror::Error;

/// Main error type for qqwry-rs
#[derive(Error, Debug)]
pub enum QqwryError {
    /// Database too small to hold the 8-byte header
    #[error("Database truncated: {0} bytes, need at least 8 for the header")]
    Truncated(usize),

    /// Invalid IPv4 address text
    #[error("Invalid IPv4 address: {0}")]
    InvalidAddress(String),

    /// Offset out of bounds inside the database buffer
    #[error("Offset out of bounds: offset={offset}, size={size}")]
    OutOfBounds { offset: usize, size: usize },

    /// Text decoding failure
    #[error("Malformed text: {0}")]
    MalformedText(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for qqwry-rs
pub type Result<T> = std::result::Result<T, QqwryError>;

impl QqwryError {
    /// Create an invalid-address error
    pub fn invalid_address<S: Into<String>>(addr: S) -> Self {
        QqwryError::InvalidAddress(addr.into())
    }

    /// Create an out-of-bounds error
    pub fn out_of_bounds(offset: usize, size: usize) -> Self {
        QqwryError::OutOfBounds { offset, size }
    }

    /// Create a malformed-text error
    pub fn malformed_text<S: Into<String>>(msg: S) -> Self {
        QqwryError::MalformedText(msg.into())
    }
}
