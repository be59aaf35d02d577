//! End-of-stream handling over a simulated TCP link.

use std::time::Duration;

use framecheck_core::{FrameReader, FrameWriter, FramingError, Transport, drain_messages};
use framecheck_harness::SimTransport;
use framecheck_proto::{ProtocolError, encode_batch};
use tokio::io::AsyncWriteExt;

#[test]
fn clean_close_after_batch() {
    let mut sim = turmoil::Builder::new().build();

    sim.host("server", || async {
        let transport = SimTransport::bind("0.0.0.0:28333").await?;
        let (send, _recv, _peer) = transport.accept().await?;

        let mut writer = FrameWriter::new(send);
        writer.send_batch(["red", "green", "blue"]).await?;
        writer.shutdown().await?;

        Ok(())
    });

    sim.client("client", async {
        let stream = SimTransport::connect_to("server:28333").await?;
        let mut reader = FrameReader::with_chunk_size(stream, 4);

        let mut words = Vec::new();
        let count = drain_messages(&mut reader, |m| {
            words.push(String::from_utf8_lossy(m.payload()).into_owned());
            Ok(())
        })
        .await?;

        assert_eq!(count, 3);
        assert_eq!(words, ["red", "green", "blue"]);

        Ok(())
    });

    sim.run().unwrap();
}

#[test]
fn close_mid_payload_is_truncation() {
    let mut sim = turmoil::Builder::new().build();

    sim.host("server", || async {
        let transport = SimTransport::bind("0.0.0.0:28333").await?;
        let (mut send, _recv, _peer) = transport.accept().await?;

        let wire = encode_batch(["complete", "partial"])?;
        send.write_all(&wire[..wire.len() - 3]).await?;
        send.shutdown().await?;

        Ok(())
    });

    sim.client("client", async {
        let stream = SimTransport::connect_to("server:28333").await?;
        let mut reader = FrameReader::new(stream);

        let first = reader.next_message().await?;
        assert_eq!(first.map(|m| m.into_payload()), Some("complete".into()));

        let err = reader.next_message().await.unwrap_err();
        assert_eq!(err, FramingError::Protocol(ProtocolError::TruncatedPayload { expected: 7, actual: 4 }));
        assert!(reader.is_done());

        Ok(())
    });

    sim.run().unwrap();
}

#[test]
fn delayed_segments_still_reassemble() {
    let mut sim = turmoil::Builder::new()
        .min_message_latency(Duration::from_millis(1))
        .max_message_latency(Duration::from_millis(20))
        .build();

    sim.host("server", || async {
        let transport = SimTransport::bind("0.0.0.0:28333").await?;
        let (mut send, _recv, _peer) = transport.accept().await?;

        // Prefix and payload cross the link as separate writes
        let wire = encode_batch(["slow", "stream"])?;
        for piece in wire.chunks(3) {
            send.write_all(piece).await?;
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        send.shutdown().await?;

        Ok(())
    });

    sim.client("client", async {
        let stream = SimTransport::connect_to("server:28333").await?;
        let mut reader = FrameReader::new(stream);

        let mut words = Vec::new();
        while let Some(message) = reader.next_message().await? {
            words.push(message.into_payload());
        }
        assert_eq!(words, ["slow", "stream"]);

        Ok(())
    });

    sim.run().unwrap();
}
