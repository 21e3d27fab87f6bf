//! Settle: normalizing heterogeneous inputs into byte sequences.

use crate::encoding::Encoding;
use crate::error::Result;

use super::Buffer;

/// A value that can settle into a byte sequence.
///
/// Construction, `write`, `fill`, and the search operations all accept any
/// value shape a Node-style buffer accepts. Rather than inspecting runtime
/// types, each shape is an explicit variant, resolved at the call site via
/// the `From` impls, so unsupported shapes are unrepresentable.
///
/// # Examples
///
/// ```
/// use fixbuf::{Buffer, Encoding, Source};
///
/// let mut buf = Buffer::alloc(4);
/// buf.write("ab", 0)?;          // Source::Text
/// buf.write(0x2Ai64, 2)?;       // Source::Int, taken modulo 256
/// buf.write([0x21u8].as_slice(), 3)?; // Source::Bytes
/// assert_eq!(&buf[..], &[0x61, 0x62, 0x2A, 0x21]);
/// # Ok::<(), fixbuf::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    /// A byte sequence, passed through unchanged.
    Bytes(&'a [u8]),
    /// A single integer, cast to a byte modulo 256.
    Int(i64),
    /// Text, encoded per the operation's [`Encoding`].
    Text(&'a str),
    /// Another buffer, yielding its bytes.
    Buffer(&'a Buffer),
}

impl Source<'_> {
    /// Normalize into a concrete byte sequence.
    ///
    /// The encoding only matters for [`Source::Text`]; all other variants
    /// ignore it. Malformed hex text fails with
    /// [`Error::InvalidArgument`](crate::Error::InvalidArgument).
    pub(crate) fn settle(self, encoding: Encoding) -> Result<Vec<u8>> {
        match self {
            Self::Bytes(bytes) => Ok(bytes.to_vec()),
            Self::Int(value) => Ok(vec![byte_of(value)]),
            Self::Text(text) => encoding.encode(text),
            Self::Buffer(buffer) => Ok(buffer.to_vec()),
        }
    }

    /// True iff the value is another [`Buffer`].
    ///
    /// The capability check of the reference surface (`isBuffer`) lives
    /// here, the one place where value shape still exists at runtime.
    #[must_use]
    pub const fn is_buffer(&self) -> bool {
        matches!(self, Self::Buffer(_))
    }
}

/// Cast-to-byte modulo 256. Euclidean so negative inputs land in `0..=255`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn byte_of(value: i64) -> u8 {
    value.rem_euclid(256) as u8
}

impl<'a> From<&'a [u8]> for Source<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Source<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Source<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<i64> for Source<'_> {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u8> for Source<'_> {
    fn from(value: u8) -> Self {
        Self::Int(i64::from(value))
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for Source<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a Buffer> for Source<'a> {
    fn from(buffer: &'a Buffer) -> Self {
        Self::Buffer(buffer)
    }
}
