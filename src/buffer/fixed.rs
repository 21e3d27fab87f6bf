//! The fixed-capacity mutable byte buffer.

use core::fmt;
use std::ops::{Add, Deref, DerefMut};

use crate::encoding::Encoding;
use crate::error::{Error, Result};

use super::Source;

/// How many bytes `Display`/`Debug` render before eliding the rest.
const PREVIEW_BYTES: usize = 35;

/// Fixed-capacity mutable byte buffer.
///
/// The length is set at construction and never changes; operations that
/// need a different length (`slice`, [`Buffer::concat`], `+`) produce a new
/// buffer with its own storage. In-place operations take `&mut self` and
/// return `&mut Self` for chaining, so exclusive access during mutation is
/// enforced at compile time.
///
/// # Examples
///
/// ```
/// use fixbuf::{Buffer, Encoding};
///
/// let mut buf = Buffer::alloc(5);
/// buf.write("ab", 0)?.write("cd", 2)?;
/// assert_eq!(buf.decode(Encoding::Hex)?, "6162636400");
/// assert_eq!(buf.size(), 4); // nonzero bytes
/// # Ok::<(), fixbuf::Error>(())
/// ```
#[derive(Clone)]
pub struct Buffer {
    /// The backing storage. Boxed slice: the length is part of the value.
    data: Box<[u8]>,
}

impl Buffer {
    // === Construction & sizing ===

    /// Allocate a zero-initialized buffer of exactly `len` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixbuf::Buffer;
    ///
    /// let buf = Buffer::alloc(4);
    /// assert_eq!(buf.len(), 4);
    /// assert!(buf.iter().all(|&b| b == 0));
    /// ```
    #[must_use]
    pub fn alloc(len: usize) -> Self {
        Buffer {
            data: vec![0; len].into_boxed_slice(),
        }
    }

    /// Allocate `len` bytes and immediately fill the whole range.
    ///
    /// The fill value settles like any other input; string fills use the
    /// given encoding. See [`Buffer::fill_range`] for the repetition rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixbuf::{Buffer, Encoding};
    ///
    /// let buf = Buffer::alloc_filled(3, 1u8, Encoding::Utf8)?;
    /// assert_eq!(&buf[..], &[1, 1, 1]);
    /// # Ok::<(), fixbuf::Error>(())
    /// ```
    pub fn alloc_filled<'a>(
        len: usize,
        fill: impl Into<Source<'a>>,
        encoding: Encoding,
    ) -> Result<Self> {
        let mut buf = Self::alloc(len);
        buf.fill_range(fill, 0, None, encoding)?;
        Ok(buf)
    }

    /// Build a buffer from a settled value; the length is the content's.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixbuf::{Buffer, Encoding};
    ///
    /// let buf = Buffer::from_source("deadbeef", Encoding::Hex)?;
    /// assert_eq!(&buf[..], &[0xDE, 0xAD, 0xBE, 0xEF]);
    /// # Ok::<(), fixbuf::Error>(())
    /// ```
    pub fn from_source<'a>(value: impl Into<Source<'a>>, encoding: Encoding) -> Result<Self> {
        Self::from_source_sized(value, encoding, 0)
    }

    /// Build a buffer from a settled value with an explicit length.
    ///
    /// A nonzero `length` fixes the result size: shorter content leaves the
    /// tail zeroed, longer content is cut at `length`. Zero means "use the
    /// content's length", preserving the reference's `length or
    /// len(content)` rule.
    pub fn from_source_sized<'a>(
        value: impl Into<Source<'a>>,
        encoding: Encoding,
        length: usize,
    ) -> Result<Self> {
        let content = value.into().settle(encoding)?;
        let len = if length == 0 { content.len() } else { length };
        let mut buf = Self::alloc(len);
        buf.copy_clamped(&content, 0, Some(len));
        Ok(buf)
    }

    // === Read accessors ===

    /// The byte count, fixed at construction.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True iff the buffer holds zero bytes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Count of bytes whose value is nonzero.
    ///
    /// A coarse "meaningful content" measure; not the length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.data.iter().filter(|&&b| b != 0).count()
    }

    /// The byte at `index`, or [`Error::IndexOutOfRange`].
    ///
    /// Plain `buf[index]` through `Deref` panics on out-of-range like any
    /// slice; this is the checked form.
    pub fn byte(&self, index: usize) -> Result<u8> {
        self.data
            .get(index)
            .copied()
            .ok_or_else(|| Error::out_of_range(index, self.data.len()))
    }

    /// Store `value` at `index`, or fail with [`Error::IndexOutOfRange`].
    pub fn set_byte(&mut self, index: usize, value: u8) -> Result<()> {
        let len = self.data.len();
        match self.data.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(Error::out_of_range(index, len)),
        }
    }

    /// Decode the whole buffer as text under `encoding`.
    ///
    /// Named `decode` rather than `toString` because `Display` already owns
    /// the human-readable rendering.
    pub fn decode(&self, encoding: Encoding) -> Result<String> {
        self.decode_range(encoding, 0, None)
    }

    /// Decode the span `[start, end)` as text under `encoding`.
    ///
    /// `end` defaults to the full length; out-of-range bounds clamp.
    /// Hex renders lowercase digit pairs; UTF-8 fails with
    /// [`Error::Decode`] on invalid bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixbuf::{Buffer, Encoding};
    ///
    /// let buf = Buffer::from_source("hello", Encoding::Utf8)?;
    /// assert_eq!(buf.decode_range(Encoding::Utf8, 1, Some(4))?, "ell");
    /// assert_eq!(buf.decode_range(Encoding::Hex, 0, None)?, "68656c6c6f");
    /// # Ok::<(), fixbuf::Error>(())
    /// ```
    pub fn decode_range(
        &self,
        encoding: Encoding,
        start: usize,
        end: Option<usize>,
    ) -> Result<String> {
        encoding.decode(self.span(start, end))
    }

    /// The clamped half-open span `[start, end)`, end defaulting to `len`.
    fn span(&self, start: usize, end: Option<usize>) -> &[u8] {
        let end = end.unwrap_or(self.data.len()).min(self.data.len());
        let start = start.min(end);
        &self.data[start..end]
    }

    // === Mutation ===

    /// Write a settled value at `offset`, UTF-8 text, no explicit bound.
    ///
    /// Shorthand for [`Buffer::write_with`] with `end = None` and
    /// [`Encoding::Utf8`].
    pub fn write<'a>(&mut self, val: impl Into<Source<'a>>, offset: usize) -> Result<&mut Self> {
        self.write_with(val, offset, None, Encoding::Utf8)
    }

    /// Write a settled value at `offset`, stopping at
    /// `min(end, len, offset + content len)`.
    ///
    /// Bytes are copied one at a time and never past the buffer's own
    /// bound. Fails with [`Error::IndexOutOfRange`] before mutating when
    /// `offset` lies beyond the buffer. Returns `&mut Self` for chaining.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixbuf::{Buffer, Encoding};
    ///
    /// let mut buf = Buffer::alloc(4);
    /// buf.write_with("abcdef", 1, None, Encoding::Utf8)?;
    /// assert_eq!(&buf[..], b"\0abc");
    /// # Ok::<(), fixbuf::Error>(())
    /// ```
    pub fn write_with<'a>(
        &mut self,
        val: impl Into<Source<'a>>,
        offset: usize,
        end: Option<usize>,
        encoding: Encoding,
    ) -> Result<&mut Self> {
        let content = val.into().settle(encoding)?;
        if offset > self.data.len() {
            return Err(Error::out_of_range(offset, self.data.len()));
        }
        let written = self.copy_clamped(&content, offset, end);
        tracing::trace!(offset, written, len = self.data.len(), "write");
        Ok(self)
    }

    /// The copy rule shared by write, construction, and concatenation: copy
    /// `content` byte-at-a-time starting at `offset`, stopping at
    /// `min(end, len, offset + content len)`. An offset at or past the stop
    /// writes nothing. Returns the number of bytes written.
    fn copy_clamped(&mut self, content: &[u8], offset: usize, end: Option<usize>) -> usize {
        let stop = end
            .unwrap_or(usize::MAX)
            .min(self.data.len())
            .min(offset.saturating_add(content.len()));
        if offset >= stop {
            return 0;
        }
        for index in offset..stop {
            self.data[index] = content[index - offset];
        }
        stop - offset
    }

    /// Fill the whole buffer with a settled value, UTF-8 text.
    pub fn fill<'a>(&mut self, val: impl Into<Source<'a>>) -> Result<&mut Self> {
        self.fill_range(val, 0, None, Encoding::Utf8)
    }

    /// Fill `[offset, end)` by repeating a settled pattern.
    ///
    /// The pattern is repeated ceiling-divided to cover the span; when the
    /// span length is not an exact multiple of the pattern length, exactly
    /// ONE trailing byte is dropped before writing. That asymmetric
    /// truncation reproduces the reference byte-for-byte (the write bound
    /// still cuts the copy at `end`), it is not a round-to-span rule.
    ///
    /// A pattern that settles to zero bytes fails with
    /// [`Error::InvalidArgument`]; filling with `0` is equivalent to
    /// [`Buffer::clear`].
    ///
    /// # Examples
    ///
    /// ```
    /// use fixbuf::{Buffer, Encoding};
    ///
    /// let mut buf = Buffer::alloc(5);
    /// buf.fill("ab")?;
    /// assert_eq!(&buf[..], &[0x61, 0x62, 0x61, 0x62, 0x61]);
    /// # Ok::<(), fixbuf::Error>(())
    /// ```
    pub fn fill_range<'a>(
        &mut self,
        val: impl Into<Source<'a>>,
        offset: usize,
        end: Option<usize>,
        encoding: Encoding,
    ) -> Result<&mut Self> {
        let pattern = val.into().settle(encoding)?;
        if pattern.is_empty() {
            return Err(Error::invalid("fill pattern settles to zero bytes"));
        }
        let total = end.unwrap_or(self.data.len());
        let count = total.saturating_sub(offset);
        let mut content = pattern.repeat(count.div_ceil(pattern.len()));
        if count % pattern.len() != 0 {
            // reference behavior: drop one trailing byte, not the remainder
            content.pop();
        }
        tracing::trace!(offset, count, pattern = pattern.len(), "fill");
        self.write_with(content.as_slice(), offset, Some(total), encoding)
    }

    /// Zero every byte.
    pub fn clear(&mut self) -> &mut Self {
        self.data.fill(0);
        self
    }

    /// Zero the span `[start, end)`, end defaulting to the full length.
    pub fn clear_range(&mut self, start: usize, end: Option<usize>) -> Result<&mut Self> {
        self.fill_range(0u8, start, end, Encoding::Utf8)
    }

    // === Copy, slice, concatenation ===

    /// Copy `[source_start, source_end)` of this buffer into `target`
    /// starting at `target_start`, through the write path.
    ///
    /// `source_end` defaults to the full length; source bounds clamp.
    /// Returns the target for chaining.
    pub fn copy_into<'t>(
        &self,
        target: &'t mut Buffer,
        target_start: usize,
        source_start: usize,
        source_end: Option<usize>,
    ) -> Result<&'t mut Buffer> {
        target.write(self.span(source_start, source_end), target_start)
    }

    /// A new, independently owned buffer holding a copy of `[start, end)`.
    ///
    /// Mutating the returned buffer never alters `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixbuf::{Buffer, Encoding};
    ///
    /// let buf = Buffer::from_source("hello world", Encoding::Utf8)?;
    /// let hello = buf.slice(0, Some(5));
    /// assert_eq!(&hello[..], b"hello");
    /// # Ok::<(), fixbuf::Error>(())
    /// ```
    #[must_use]
    pub fn slice(&self, start: usize, end: Option<usize>) -> Buffer {
        Buffer {
            data: self.span(start, end).to_vec().into_boxed_slice(),
        }
    }

    /// Concatenate buffers into a new buffer sized to the sum of inputs.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixbuf::{Buffer, Encoding};
    ///
    /// let a = Buffer::from_source("ab", Encoding::Utf8)?;
    /// let b = Buffer::from_source("cd", Encoding::Utf8)?;
    /// assert_eq!(Buffer::concat([&a, &b]).decode(Encoding::Utf8)?, "abcd");
    /// # Ok::<(), fixbuf::Error>(())
    /// ```
    #[must_use]
    pub fn concat<'a>(buffers: impl IntoIterator<Item = &'a Buffer>) -> Buffer {
        let buffers: Vec<&Buffer> = buffers.into_iter().collect();
        let total = buffers.iter().map(|b| b.len()).sum();
        Self::concat_into(&buffers, total)
    }

    /// Concatenate with an explicitly supplied total length.
    ///
    /// A negative `length` is reinterpreted through [`legacy_len`] (32-bit
    /// unsigned wraparound). A truncating length does not raise: copies are
    /// clamped, and the write position still advances by each input's FULL
    /// length, so bytes of later inputs are silently dropped exactly as the
    /// reference drops them.
    #[must_use]
    pub fn concat_sized<'a>(buffers: impl IntoIterator<Item = &'a Buffer>, length: i64) -> Buffer {
        let buffers: Vec<&Buffer> = buffers.into_iter().collect();
        Self::concat_into(&buffers, legacy_len(length))
    }

    fn concat_into(buffers: &[&Buffer], total: usize) -> Buffer {
        let mut out = Buffer::alloc(total);
        let mut pos = 0usize;
        for buf in buffers {
            out.copy_clamped(buf, pos, None);
            // advance by the input's own length, not by the bytes written
            pos = pos.saturating_add(buf.len());
        }
        tracing::trace!(total, inputs = buffers.len(), "concat");
        out
    }

    // === Search ===

    /// Index of the first occurrence of a settled needle in
    /// `self[offset..]`, RELATIVE to the start of the searched sub-range.
    ///
    /// Absent needles fail with [`Error::NotFound`]; an offset beyond the
    /// buffer fails with [`Error::IndexOutOfRange`].
    ///
    /// # Examples
    ///
    /// ```
    /// use fixbuf::{Buffer, Encoding};
    ///
    /// let buf = Buffer::from_source("xxabc", Encoding::Utf8)?;
    /// // relative to the sub-range, not the whole buffer
    /// assert_eq!(buf.index_of("abc", 2, Encoding::Utf8)?, 0);
    /// # Ok::<(), fixbuf::Error>(())
    /// ```
    pub fn index_of<'a>(
        &self,
        needle: impl Into<Source<'a>>,
        offset: usize,
        encoding: Encoding,
    ) -> Result<usize> {
        let needle = needle.into().settle(encoding)?;
        let haystack = self.search_range(offset)?;
        find(haystack, &needle).ok_or(Error::NotFound)
    }

    /// Index of the last occurrence of a settled needle in `self[offset..]`,
    /// still measured from the start of the sub-range.
    pub fn last_index_of<'a>(
        &self,
        needle: impl Into<Source<'a>>,
        offset: usize,
        encoding: Encoding,
    ) -> Result<usize> {
        let needle = needle.into().settle(encoding)?;
        let haystack = self.search_range(offset)?;
        rfind(haystack, &needle).ok_or(Error::NotFound)
    }

    /// Whether the buffer includes a settled needle at or after `offset`,
    /// under the legacy truthiness policy: a match at relative index 0
    /// counts as absent.
    ///
    /// The reference folds the raw search index into a boolean, so a hit at
    /// the very start of the sub-range reads as `false`. Preserved as a
    /// named policy rather than silently corrected; use
    /// [`Buffer::index_of`] directly for the unambiguous answer.
    pub fn includes<'a>(
        &self,
        needle: impl Into<Source<'a>>,
        offset: usize,
        encoding: Encoding,
    ) -> bool {
        self.index_of(needle, offset, encoding)
            .is_ok_and(|index| index != 0)
    }

    fn search_range(&self, offset: usize) -> Result<&[u8]> {
        self.data
            .get(offset..)
            .ok_or_else(|| Error::out_of_range(offset, self.data.len()))
    }
}

/// 32-bit unsigned reinterpretation of a signed length.
///
/// Preserves the legacy numeric coercion of the reference surface: a
/// negative explicit concat length wraps around `u32` instead of being
/// rejected.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn legacy_len(length: i64) -> usize {
    (length as u32) as usize
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(haystack.len());
    }
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

impl Default for Buffer {
    fn default() -> Self {
        Self::alloc(0)
    }
}

impl Deref for Buffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl DerefMut for Buffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl AsMut<[u8]> for Buffer {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(vec: Vec<u8>) -> Self {
        Buffer {
            data: vec.into_boxed_slice(),
        }
    }
}

impl From<&[u8]> for Buffer {
    fn from(slice: &[u8]) -> Self {
        Buffer {
            data: slice.to_vec().into_boxed_slice(),
        }
    }
}

impl From<&str> for Buffer {
    fn from(s: &str) -> Self {
        Buffer {
            data: s.as_bytes().to_vec().into_boxed_slice(),
        }
    }
}

/// `a + b` is `concat([a, b])`: a brand-new buffer, operands untouched.
impl Add for &Buffer {
    type Output = Buffer;

    fn add(self, rhs: &Buffer) -> Buffer {
        Buffer::concat([self, rhs])
    }
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for Buffer {}

impl PartialEq<[u8]> for Buffer {
    fn eq(&self, other: &[u8]) -> bool {
        &*self.data == other
    }
}

impl PartialEq<Buffer> for [u8] {
    fn eq(&self, other: &Buffer) -> bool {
        self == &*other.data
    }
}

impl PartialEq<Vec<u8>> for Buffer {
    fn eq(&self, other: &Vec<u8>) -> bool {
        &*self.data == other.as_slice()
    }
}

impl std::hash::Hash for Buffer {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.data.hash(state);
    }
}

/// `<Buffer xx xx ...>`: up to the first 35 bytes as lowercase hex pairs,
/// then a note of how many bytes were omitted.
impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Buffer")?;
        for byte in self.data.iter().take(PREVIEW_BYTES) {
            write!(f, " {byte:02x}")?;
        }
        if self.data.len() > PREVIEW_BYTES {
            write!(f, " ... {} more bytes", self.data.len() - PREVIEW_BYTES)?;
        }
        write!(f, ">")
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
