//! Async frame reader.
//!
//! Drives a [`FrameDecoder`] from any `AsyncRead`. The reader loops on
//! transport reads until the head frame is complete, so callers see whole
//! messages no matter how the bytes were split in transit.

use framecheck_proto::{FrameDecoder, Message};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, trace};

use crate::error::FramingError;

/// Bytes requested from the transport per read
pub const DEFAULT_READ_CHUNK: usize = 8 * 1024;

/// Reads length-prefixed messages from one connection.
///
/// # Lifecycle
///
/// ```text
/// ┌──────┐  next_message()   ┌──────┐
/// │ Open │──────────────────>│ Open │  Ok(Some(message))
/// └──────┘                   └──────┘
///     │
///     │ clean EOF / truncation / transport error
///     ↓
/// ┌──────┐
/// │ Done │  Ok(None) forever
/// └──────┘
/// ```
///
/// Once end-of-stream or an error has been returned the reader is done.
/// It never yields another message; a new connection needs a new reader.
///
/// Each read asks the transport for up to a whole chunk rather than exactly
/// the prefix and then exactly the payload. Bytes past the current frame
/// stay in this reader's decoder and are served by the next call. The read
/// buffer belongs to this reader alone; nothing about an in-flight frame is
/// visible outside it.
#[derive(Debug)]
pub struct FrameReader<R> {
    inner: R,
    decoder: FrameDecoder,
    chunk: Box<[u8]>,
    done: bool,
    received: u64,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    /// Wrap a byte stream.
    pub fn new(inner: R) -> Self {
        Self::with_chunk_size(inner, DEFAULT_READ_CHUNK)
    }

    /// Wrap a byte stream, requesting at most `chunk_size` bytes per read.
    ///
    /// A `chunk_size` of zero is raised to one.
    pub fn with_chunk_size(inner: R, chunk_size: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            inner,
            decoder: FrameDecoder::with_capacity(chunk_size),
            chunk: vec![0u8; chunk_size].into_boxed_slice(),
            done: false,
            received: 0,
        }
    }

    /// Wait for the next complete message.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(message))` once a whole frame has arrived
    /// - `Ok(None)` on a clean end-of-stream (the peer closed between
    ///   frames), and on every call after the reader is done
    ///
    /// # Errors
    ///
    /// - [`FramingError::Protocol`] with a truncation error if the stream
    ///   ended inside a length prefix or payload
    /// - [`FramingError::Transport`] if a read failed
    pub async fn next_message(&mut self) -> Result<Option<Message>, FramingError> {
        if self.done {
            return Ok(None);
        }

        loop {
            if let Some(message) = self.decoder.decode() {
                self.received += 1;
                debug!(len = message.len(), index = self.received, "message received");
                return Ok(Some(message));
            }

            let n = match self.inner.read(&mut self.chunk).await {
                Ok(n) => n,
                Err(err) => {
                    self.done = true;
                    return Err(err.into());
                },
            };

            if n == 0 {
                self.done = true;
                self.decoder.finish()?;
                debug!(messages = self.received, "end of stream");
                return Ok(None);
            }

            self.decoder.feed(&self.chunk[..n]);
            trace!(bytes = n, buffered = self.decoder.buffered(), "read from transport");
        }
    }

    /// Number of messages delivered so far
    pub fn messages_received(&self) -> u64 {
        self.received
    }

    /// True once end-of-stream or an error has been reported
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Recover the underlying stream, discarding any partial frame.
    pub fn into_inner(self) -> R {
        self.inner
    }
}
