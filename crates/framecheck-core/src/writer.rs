//! Async frame writer.

use bytes::BytesMut;
use framecheck_proto::{encode_into, frame::LENGTH_PREFIX_SIZE};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::error::FramingError;

/// Writes length-prefixed messages to one connection.
///
/// Frames are encoded into a scratch buffer owned by this writer and handed
/// to the transport with a single `write_all`, so a batch either encodes
/// completely or nothing reaches the stream.
#[derive(Debug)]
pub struct FrameWriter<W> {
    inner: W,
    scratch: BytesMut,
    sent: u64,
}

impl<W: AsyncWrite + Unpin> FrameWriter<W> {
    /// Wrap a byte sink.
    pub fn new(inner: W) -> Self {
        Self { inner, scratch: BytesMut::new(), sent: 0 }
    }

    /// Send one message.
    ///
    /// # Errors
    ///
    /// - [`FramingError::Protocol`] if the payload exceeds the 16-bit length
    ///   field (nothing is written)
    /// - [`FramingError::Transport`] if the write fails
    pub async fn send(&mut self, payload: &[u8]) -> Result<(), FramingError> {
        self.scratch.clear();
        self.scratch.reserve(LENGTH_PREFIX_SIZE + payload.len());
        encode_into(payload, &mut self.scratch)?;

        self.inner.write_all(&self.scratch).await?;
        self.sent += 1;
        debug!(len = payload.len(), "message sent");
        Ok(())
    }

    /// Send several messages in one transport write.
    ///
    /// Returns the number of messages written.
    ///
    /// # Errors
    ///
    /// Same as [`FrameWriter::send`]. An oversized payload anywhere in the
    /// batch rejects the whole batch before any byte is written.
    pub async fn send_batch<I, P>(&mut self, payloads: I) -> Result<usize, FramingError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        self.scratch.clear();

        let mut count = 0;
        for payload in payloads {
            encode_into(payload.as_ref(), &mut self.scratch)?;
            count += 1;
        }

        self.inner.write_all(&self.scratch).await?;
        self.sent += count as u64;
        debug!(messages = count, bytes = self.scratch.len(), "batch sent");
        Ok(count)
    }

    /// Flush buffered bytes to the transport.
    pub async fn flush(&mut self) -> Result<(), FramingError> {
        self.inner.flush().await?;
        Ok(())
    }

    /// Flush and close the write half, signalling end-of-stream to the peer.
    pub async fn shutdown(&mut self) -> Result<(), FramingError> {
        self.inner.flush().await?;
        self.inner.shutdown().await?;
        Ok(())
    }

    /// Number of messages written so far
    pub fn messages_sent(&self) -> u64 {
        self.sent
    }

    /// Recover the underlying sink.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use framecheck_proto::{MAX_PAYLOAD_SIZE, ProtocolError};

    use super::*;
    use crate::reader::FrameReader;

    #[tokio::test]
    async fn send_writes_prefix_and_payload() {
        let mut writer = FrameWriter::new(Vec::new());
        writer.send(b"abc").await.unwrap();
        writer.send(b"").await.unwrap();

        assert_eq!(writer.messages_sent(), 2);
        assert_eq!(writer.into_inner(), [0x00, 0x03, b'a', b'b', b'c', 0x00, 0x00]);
    }

    #[tokio::test]
    async fn flush_delivers_through_buffered_sink() {
        let mut writer = FrameWriter::new(tokio::io::BufWriter::new(Vec::new()));
        writer.send(b"hi").await.unwrap();
        writer.flush().await.unwrap();

        assert_eq!(writer.into_inner().into_inner(), [0x00, 0x02, b'h', b'i']);
    }

    #[tokio::test]
    async fn oversized_batch_writes_nothing() {
        let big = vec![0u8; MAX_PAYLOAD_SIZE + 1];
        let mut writer = FrameWriter::new(Vec::new());

        let err = writer.send_batch([&b"ok"[..], &big[..]]).await.unwrap_err();
        assert_eq!(
            err,
            FramingError::Protocol(ProtocolError::PayloadTooLarge {
                size: MAX_PAYLOAD_SIZE + 1,
                max: MAX_PAYLOAD_SIZE,
            })
        );
        assert!(writer.into_inner().is_empty());
    }

    #[tokio::test]
    async fn batch_round_trips_through_duplex() {
        let (client, server) = tokio::io::duplex(64);

        let send = tokio::spawn(async move {
            let mut writer = FrameWriter::new(server);
            let count = writer.send_batch(["alpha", "beta", "gamma"]).await?;
            writer.shutdown().await?;
            Ok::<_, FramingError>(count)
        });

        let mut reader = FrameReader::with_chunk_size(client, 3);
        let mut words = Vec::new();
        while let Some(message) = reader.next_message().await.unwrap() {
            words.push(message.into_payload());
        }

        assert_eq!(send.await.unwrap(), Ok(3));
        assert_eq!(words, ["alpha", "beta", "gamma"]);
    }
}
