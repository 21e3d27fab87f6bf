//! Fixed-Capacity Byte Buffers
//!
//! The core entity of the crate: an owned, contiguous, mutable byte sequence
//! with a length fixed at construction time.
//!
//! # Overview
//!
//! This module provides:
//! - [`Buffer`]: the fixed-length mutable byte sequence
//! - [`Source`]: the settle input, a sum type over the value shapes that can
//!   normalize into bytes
//! - [`BufferRecord`]: the canonical structured export shape for
//!   cross-boundary transport
//!
//! # Design Notes
//!
//! Mutating methods (`write`, `fill`, `clear`, element assignment) borrow
//! the receiver exclusively and return it for chaining. View-producing
//! methods (`slice`, `concat`, `+`) always allocate new, fully independent
//! storage; two buffers never alias.

mod fixed;
mod record;
mod source;

pub use fixed::Buffer;
pub use record::BufferRecord;
pub use source::Source;
