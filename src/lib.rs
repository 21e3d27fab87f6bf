//! Fixbuf: fixed-capacity byte buffers with Node.js `Buffer` semantics.
//!
//! # Overview
//!
//! The crate centers on one type, [`Buffer`]: an owned, contiguous, mutable
//! byte sequence whose length is fixed at construction time. Every operation
//! that changes the length (`slice`, `concat`, the `+` operator) produces a
//! brand-new, independently owned buffer; every in-place operation (`write`,
//! `fill`, `clear`, element assignment) mutates the receiver through `&mut`
//! and returns it for chaining.
//!
//! Heterogeneous inputs (byte slices, single integers, text, other buffers)
//! are normalized into byte sequences by the settle algorithm, expressed as
//! the [`Source`] sum type resolved at the call site. Text flows in and out
//! through a named [`Encoding`] (`utf8` or `hex`).
//!
//! # Core Guarantees
//!
//! - **Fixed length**: a buffer never grows or shrinks after construction
//! - **No aliasing**: slicing and concatenation always copy; two buffers
//!   never share storage
//! - **Fail-before-mutate**: settle validation happens before any byte is
//!   written, so a mutating call either completes within its span or leaves
//!   the buffer untouched
//! - **Typed errors**: every failure is one of four [`Error`] kinds, never a
//!   panic (index sugar through `Deref` keeps the standard slice contract)
//!
//! # Module Structure
//!
//! - [`buffer`]: the [`Buffer`] type, the [`Source`] settle input, and the
//!   [`BufferRecord`] export shape
//! - [`encoding`]: text/byte conversion schemes
//! - [`error`]: error types
//!
//! # Examples
//!
//! ```
//! use fixbuf::{Buffer, Encoding};
//!
//! let mut buf = Buffer::alloc(11);
//! buf.write("hello world", 0)?;
//! assert_eq!(buf.decode(Encoding::Utf8)?, "hello world");
//!
//! let hello = buf.slice(0, Some(5));
//! assert_eq!(hello.decode(Encoding::Hex)?, "68656c6c6f");
//! # Ok::<(), fixbuf::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod buffer;
pub mod encoding;
pub mod error;

pub use buffer::{Buffer, BufferRecord, Source};
pub use encoding::Encoding;
pub use error::{Error, Result};
