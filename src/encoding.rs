//! Text/byte conversion schemes.
//!
//! An [`Encoding`] names how string content is turned into bytes on the way
//! in and how bytes are rendered as text on the way out. It is a parameter
//! of each call, never stored on a buffer.

use core::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A named scheme governing text/byte conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// UTF-8 text. The default for every operation that takes an encoding.
    #[default]
    Utf8,
    /// Two lowercase hexadecimal digits per byte.
    Hex,
}

impl Encoding {
    /// Encode text into bytes under this scheme.
    ///
    /// For [`Encoding::Hex`] the text is interpreted as hexadecimal digit
    /// pairs (case-insensitive on input); malformed hex fails with
    /// [`Error::InvalidArgument`].
    ///
    /// # Examples
    ///
    /// ```
    /// use fixbuf::Encoding;
    ///
    /// assert_eq!(Encoding::Utf8.encode("hi")?, vec![0x68, 0x69]);
    /// assert_eq!(Encoding::Hex.encode("6869")?, vec![0x68, 0x69]);
    /// # Ok::<(), fixbuf::Error>(())
    /// ```
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Hex => {
                hex::decode(text).map_err(|e| Error::invalid(format!("bad hex input: {e}")))
            }
        }
    }

    /// Decode bytes into text under this scheme.
    ///
    /// [`Encoding::Hex`] always succeeds and renders lowercase digit pairs;
    /// [`Encoding::Utf8`] fails with [`Error::Decode`] when the bytes are
    /// not valid UTF-8.
    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        match self {
            Self::Utf8 => String::from_utf8(bytes.to_vec())
                .map_err(|e| Error::decode(format!("invalid utf-8: {e}"))),
            Self::Hex => Ok(hex::encode(bytes)),
        }
    }

    /// The wire name of this encoding.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Hex => "hex",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "hex" => Ok(Self::Hex),
            other => Err(Error::invalid(format!("unknown encoding: {other:?}"))),
        }
    }
}
