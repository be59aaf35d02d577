//! Length-prefixed message framing.
//!
//! Layout on the wire, repeated until the transport closes:
//!
//! ```text
//! ┌────────────────────┬──────────────────────────┐
//! │ length: u16 (BE)   │ payload: `length` bytes  │
//! └────────────────────┴──────────────────────────┘
//! ```
//!
//! There is no delimiter, version field, or trailer. Message boundaries are
//! recovered purely from the prefixes, so payloads may contain any byte
//! value including zero.

use bytes::{BufMut, Bytes, BytesMut};

use crate::errors::{ProtocolError, Result};

/// Size of the big-endian length prefix in bytes
pub const LENGTH_PREFIX_SIZE: usize = 2;

/// Largest payload a 16-bit prefix can describe
pub const MAX_PAYLOAD_SIZE: usize = u16::MAX as usize;

/// A complete, decoded message payload.
///
/// # Invariants
///
/// - **Size Limit**: `payload.len()` never exceeds [`MAX_PAYLOAD_SIZE`].
///   Enforced by [`Message::new`] and by the decoder, which only ever
///   extracts as many bytes as a 16-bit prefix announced.
///
/// - **Completeness**: A `Message` only exists once every payload byte has
///   arrived. Partially received frames stay inside the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    payload: Bytes,
}

impl Message {
    /// Wrap a payload, rejecting anything the prefix cannot describe.
    pub fn new(payload: impl Into<Bytes>) -> Result<Self> {
        let payload = payload.into();
        checked_length(payload.len())?;
        Ok(Self { payload })
    }

    /// Caller guarantees the size limit (the decoder slices by prefix).
    pub(crate) fn from_frame_payload(payload: Bytes) -> Self {
        debug_assert!(payload.len() <= MAX_PAYLOAD_SIZE);
        Self { payload }
    }

    /// Length prefix value for this message
    pub fn len(&self) -> u16 {
        self.payload.len() as u16
    }

    /// True for a zero-length payload
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Borrow the payload bytes
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Take ownership of the payload bytes
    pub fn into_payload(self) -> Bytes {
        self.payload
    }

    /// Encode this message into `dst` as one frame.
    pub fn encode(&self, dst: &mut impl BufMut) {
        dst.put_u16(self.len());
        dst.put_slice(&self.payload);
    }
}

impl AsRef<[u8]> for Message {
    fn as_ref(&self) -> &[u8] {
        &self.payload
    }
}

fn checked_length(size: usize) -> Result<u16> {
    u16::try_from(size)
        .map_err(|_| ProtocolError::PayloadTooLarge { size, max: MAX_PAYLOAD_SIZE })
}

/// Encode one payload as `[length][payload]` into a caller-owned buffer.
///
/// The size check happens before anything is written, so a rejected
/// payload leaves `dst` untouched.
///
/// # Errors
///
/// Returns [`ProtocolError::PayloadTooLarge`] if the payload exceeds
/// [`MAX_PAYLOAD_SIZE`].
pub fn encode_into(payload: &[u8], dst: &mut impl BufMut) -> Result<()> {
    let length = checked_length(payload.len())?;

    dst.put_u16(length);
    dst.put_slice(payload);

    Ok(())
}

/// Encode one payload as a standalone frame.
pub fn encode(payload: &[u8]) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(LENGTH_PREFIX_SIZE + payload.len());
    encode_into(payload, &mut buf)?;
    Ok(buf.freeze())
}

/// Encode many payloads back to back into a single buffer.
///
/// The result is exactly the concatenation of each payload's [`encode`]
/// output. Either every payload is encoded or none is.
pub fn encode_batch<I, P>(payloads: I) -> Result<Bytes>
where
    I: IntoIterator<Item = P>,
    P: AsRef<[u8]>,
{
    let mut buf = BytesMut::new();
    for payload in payloads {
        encode_into(payload.as_ref(), &mut buf)?;
    }
    Ok(buf.freeze())
}
