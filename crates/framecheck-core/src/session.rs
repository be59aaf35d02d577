//! Per-connection message loop.

use std::io;

use framecheck_proto::Message;
use tokio::io::AsyncRead;
use tracing::{debug, warn};

use crate::{error::FramingError, reader::FrameReader};

/// Deliver every message on a connection to `on_message` in arrival order.
///
/// Each message is handed over as soon as it is complete; nothing is
/// buffered until end-of-stream. Returns the number of messages delivered
/// once the peer closes cleanly.
///
/// # Errors
///
/// - Truncation or transport failure from the reader
/// - [`FramingError::Consumer`] if `on_message` fails
///
/// Messages delivered before the failure stay delivered.
pub async fn drain_messages<R, F>(reader: &mut FrameReader<R>, mut on_message: F) -> Result<usize, FramingError>
where
    R: AsyncRead + Unpin,
    F: FnMut(Message) -> io::Result<()>,
{
    let mut delivered = 0;

    loop {
        match reader.next_message().await {
            Ok(Some(message)) => {
                on_message(message).map_err(|e| {
                    warn!(delivered, error = %e, "message consumer failed");
                    FramingError::Consumer(e.to_string())
                })?;
                delivered += 1;
            },
            Ok(None) => {
                debug!(delivered, "connection closed cleanly");
                return Ok(delivered);
            },
            Err(e) => {
                warn!(delivered, error = %e, truncated = e.is_truncation(), "connection ended abnormally");
                return Err(e);
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use framecheck_proto::{ProtocolError, encode_batch};

    use super::*;

    #[tokio::test]
    async fn delivers_all_then_counts() {
        let wire = encode_batch(["a", "bb", "ccc"]).unwrap();
        let mut reader = FrameReader::with_chunk_size(&wire[..], 2);

        let mut lens = Vec::new();
        let count = drain_messages(&mut reader, |m| {
            lens.push(m.len());
            Ok(())
        })
        .await
        .unwrap();

        assert_eq!(count, 3);
        assert_eq!(lens, [1, 2, 3]);
    }

    #[tokio::test]
    async fn truncation_keeps_earlier_messages() {
        let wire = encode_batch(["kept", "lost"]).unwrap();
        let mut reader = FrameReader::new(&wire[..wire.len() - 2]);

        let mut seen = Vec::new();
        let err = drain_messages(&mut reader, |m| {
            seen.push(m.into_payload());
            Ok(())
        })
        .await
        .unwrap_err();

        assert_eq!(seen, ["kept"]);
        assert_eq!(err, FramingError::Protocol(ProtocolError::TruncatedPayload { expected: 4, actual: 2 }));
    }

    #[tokio::test]
    async fn consumer_failure_stops_the_loop() {
        let wire = encode_batch(["one", "two"]).unwrap();
        let mut reader = FrameReader::new(&wire[..]);

        let mut calls = 0;
        let err = drain_messages(&mut reader, |_| {
            calls += 1;
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"))
        })
        .await
        .unwrap_err();

        assert_eq!(calls, 1);
        assert_eq!(err, FramingError::Consumer("stdout closed".to_string()));
    }
}
