//! Error types for buffer operations.
//!
//! Every fallible operation in the crate reports one of four kinds:
//!
//! - [`Error::InvalidArgument`]: an input could not settle into a byte
//!   sequence (malformed hex text, empty fill pattern, bad record tag)
//! - [`Error::IndexOutOfRange`]: an index or offset lies outside `[0, len)`
//! - [`Error::Decode`]: bytes are not valid for the requested text encoding
//! - [`Error::NotFound`]: a searched value is absent
//!
//! All errors are raised synchronously at the call that detects them; there
//! are no retries and no partial-success states. The one designed
//! error-to-value conversion is `Buffer::includes`, which folds `NotFound`
//! (and everything else) into `false`.

/// Errors surfaced by buffer construction, mutation, decoding, and search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An input value cannot settle into a byte sequence.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the input.
        reason: String,
    },
    /// An index or offset lies outside the buffer's bounds.
    #[error("index out of range: {index} not within 0..{len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The buffer length at the time of the access.
        len: usize,
    },
    /// The addressed bytes are not valid for the requested text encoding.
    #[error("decode failed: {reason}")]
    Decode {
        /// Why the bytes could not be decoded.
        reason: String,
    },
    /// The searched value is absent from the buffer.
    #[error("value not found in buffer")]
    NotFound,
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    pub(crate) fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for buffer operations.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_argument() {
        let err = Error::invalid("no shape");
        assert_eq!(err.to_string(), "invalid argument: no shape");
    }

    #[test]
    fn display_index_out_of_range() {
        let err = Error::out_of_range(7, 5);
        assert_eq!(err.to_string(), "index out of range: 7 not within 0..5");
    }

    #[test]
    fn display_decode() {
        let err = Error::decode("not utf-8");
        assert_eq!(err.to_string(), "decode failed: not utf-8");
    }

    #[test]
    fn display_not_found() {
        assert_eq!(Error::NotFound.to_string(), "value not found in buffer");
    }
}
