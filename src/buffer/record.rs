//! Structured export record for cross-boundary transport.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::Buffer;

/// The type tag carried by every exported record.
const BUFFER_TAG: &str = "Buffer";

/// Canonical structured representation of a buffer:
/// `{"type": "Buffer", "data": [...]}`.
///
/// This is the JSON-ish shape used for transport and debugging across
/// process boundaries; the serializer itself is not owned here.
///
/// # Examples
///
/// ```
/// use fixbuf::{Buffer, Encoding};
///
/// let buf = Buffer::alloc_filled(3, 1u8, Encoding::Utf8)?;
/// let json = serde_json::to_string(&buf.to_record()).unwrap();
/// assert_eq!(json, r#"{"type":"Buffer","data":[1,1,1]}"#);
/// # Ok::<(), fixbuf::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferRecord {
    /// Type tag, always `"Buffer"` for records produced here.
    #[serde(rename = "type")]
    pub kind: String,
    /// The byte values in order.
    pub data: Vec<u8>,
}

impl Buffer {
    /// Export as a [`BufferRecord`] (a snapshot; the record owns its data).
    #[must_use]
    pub fn to_record(&self) -> BufferRecord {
        BufferRecord {
            kind: BUFFER_TAG.to_owned(),
            data: self.to_vec(),
        }
    }
}

impl From<&Buffer> for BufferRecord {
    fn from(buffer: &Buffer) -> Self {
        buffer.to_record()
    }
}

impl TryFrom<BufferRecord> for Buffer {
    type Error = Error;

    fn try_from(record: BufferRecord) -> Result<Self> {
        if record.kind != BUFFER_TAG {
            return Err(Error::invalid(format!(
                "unexpected record type: {:?}",
                record.kind
            )));
        }
        Ok(Buffer::from(record.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_shape_matches_reference() {
        let buf = Buffer::from(vec![1, 1, 1]);
        let record = buf.to_record();
        assert_eq!(record.kind, "Buffer");
        assert_eq!(record.data, vec![1, 1, 1]);
    }

    #[test]
    fn record_serializes_to_canonical_json() {
        let buf = Buffer::from(vec![0, 255]);
        let json = serde_json::to_string(&buf.to_record()).expect("serialize");
        assert_eq!(json, r#"{"type":"Buffer","data":[0,255]}"#);
    }

    #[test]
    fn record_roundtrips_through_json() {
        let buf = Buffer::from(vec![9, 8, 7]);
        let json = serde_json::to_string(&buf.to_record()).expect("serialize");
        let record: BufferRecord = serde_json::from_str(&json).expect("deserialize");
        let back = Buffer::try_from(record).expect("rebuild");
        assert_eq!(back, buf);
    }

    #[test]
    fn record_with_wrong_tag_is_rejected() {
        let record = BufferRecord {
            kind: "NotABuffer".to_owned(),
            data: vec![],
        };
        assert!(Buffer::try_from(record).is_err());
    }

    #[test]
    fn record_is_a_snapshot() {
        let mut buf = Buffer::from(vec![1]);
        let record = buf.to_record();
        buf[0] = 2;
        assert_eq!(record.data, vec![1]);
    }
}
