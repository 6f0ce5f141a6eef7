#![forbid(unsafe_code)]

//! UTF-8 validation for byte input.
//!
//! The renderer only ever sees `str`; bytes from elsewhere pass through
//! [`decode_utf8`] first and are never re-validated afterwards.

use std::fmt;

/// Input bytes are not valid UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeError {
    valid_up_to: usize,
    error_len: Option<usize>,
}

impl DecodeError {
    /// Length of the valid prefix in bytes.
    #[must_use]
    pub const fn valid_up_to(&self) -> usize {
        self.valid_up_to
    }

    /// Length of the invalid sequence, or `None` if the input ended mid-sequence.
    #[must_use]
    pub const fn error_len(&self) -> Option<usize> {
        self.error_len
    }
}

impl From<std::str::Utf8Error> for DecodeError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self {
            valid_up_to: err.valid_up_to(),
            error_len: err.error_len(),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error_len {
            Some(len) => write!(
                f,
                "invalid UTF-8 sequence of {len} byte(s) at offset {}",
                self.valid_up_to
            ),
            None => write!(
                f,
                "incomplete UTF-8 sequence at offset {}",
                self.valid_up_to
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Validate `bytes` as UTF-8 without copying.
pub fn decode_utf8(bytes: &[u8]) -> Result<&str, DecodeError> {
    Ok(std::str::from_utf8(bytes)?)
}
