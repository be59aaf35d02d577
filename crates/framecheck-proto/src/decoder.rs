//! Sans-IO frame decoder.
//!
//! The decoder owns the per-connection read buffer. Callers push whatever
//! bytes the transport produced with [`FrameDecoder::feed`], then pull
//! complete messages with [`FrameDecoder::decode`]. Transport reads may be
//! split anywhere, including inside the length prefix.
//!
//! # Invariants
//!
//! - Bytes leave the buffer only as part of a complete frame (prefix and
//!   payload together). A partial frame is never consumed.
//! - One decoder per connection. The buffer is never shared.

use bytes::{Buf, BytesMut};

use crate::{
    errors::{ProtocolError, Result},
    frame::{LENGTH_PREFIX_SIZE, Message},
};

/// Incremental decoder for `[u16 length][payload]` frames.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buf: BytesMut,
}

impl FrameDecoder {
    /// Create an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty decoder with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { buf: BytesMut::with_capacity(capacity) }
    }

    /// Append bytes received from the transport.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Number of bytes held that do not yet form a complete frame.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Announced payload length of the frame at the head of the buffer.
    ///
    /// `None` until both prefix bytes have arrived.
    pub fn pending_length(&self) -> Option<usize> {
        match self.buf.get(..LENGTH_PREFIX_SIZE) {
            Some(&[hi, lo]) => Some(usize::from(u16::from_be_bytes([hi, lo]))),
            _ => None,
        }
    }

    /// Bytes still missing before the head frame can be decoded.
    ///
    /// Before the prefix is complete this counts only the missing prefix
    /// bytes, since the payload length is not known yet.
    pub fn needed(&self) -> usize {
        match self.pending_length() {
            Some(length) => (LENGTH_PREFIX_SIZE + length).saturating_sub(self.buf.len()),
            None => LENGTH_PREFIX_SIZE - self.buf.len(),
        }
    }

    /// Extract the next complete message, if one is fully buffered.
    ///
    /// Returns `None` without consuming anything when the head frame is
    /// still incomplete.
    pub fn decode(&mut self) -> Option<Message> {
        let length = self.pending_length()?;
        if self.buf.len() < LENGTH_PREFIX_SIZE + length {
            return None;
        }

        self.buf.advance(LENGTH_PREFIX_SIZE);
        let payload = self.buf.split_to(length).freeze();

        Some(Message::from_frame_payload(payload))
    }

    /// Check that the stream ended on a frame boundary.
    ///
    /// Call once the transport reports end-of-stream and [`decode`] has
    /// returned `None`.
    ///
    /// [`decode`]: FrameDecoder::decode
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::TruncatedPrefix`] if the stream ended inside a
    ///   length prefix
    /// - [`ProtocolError::TruncatedPayload`] if it ended inside a payload
    pub fn finish(&self) -> Result<()> {
        match self.pending_length() {
            None if self.buf.is_empty() => Ok(()),
            None => Err(ProtocolError::TruncatedPrefix { received: self.buf.len() }),
            Some(expected) => {
                let actual = self.buf.len() - LENGTH_PREFIX_SIZE;
                debug_assert!(actual < expected, "complete frame left undecoded");
                Err(ProtocolError::TruncatedPayload { expected, actual })
            },
        }
    }
}
