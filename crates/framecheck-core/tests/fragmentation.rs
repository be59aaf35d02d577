//! Message boundaries are independent of how the stream is split in transit.

use std::io;

use framecheck_core::{FrameReader, FramingError};
use framecheck_harness::ChunkedReader;
use framecheck_proto::{Message, encode_batch};
use proptest::prelude::*;

fn read_all(reader: ChunkedReader, chunk_size: usize) -> (Vec<Vec<u8>>, Result<(), FramingError>) {
    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();

    runtime.block_on(async move {
        let mut reader = FrameReader::with_chunk_size(reader, chunk_size);
        let mut payloads = Vec::new();
        loop {
            match reader.next_message().await {
                Ok(Some(message)) => payloads.push(message.into_payload().to_vec()),
                Ok(None) => return (payloads, Ok(())),
                Err(e) => return (payloads, Err(e)),
            }
        }
    })
}

proptest! {
    #[test]
    fn any_split_yields_the_same_messages(
        payloads in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..300), 0..8),
        seed in any::<u64>(),
        max_chunk in 1usize..32,
        chunk_size in 1usize..64,
    ) {
        let wire = encode_batch(&payloads).unwrap();
        let (received, end) = read_all(ChunkedReader::seeded(wire.to_vec(), seed, max_chunk), chunk_size);

        prop_assert_eq!(end, Ok(()));
        prop_assert_eq!(received, payloads);
    }

    #[test]
    fn any_cut_inside_the_last_frame_is_truncation(
        payloads in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..64), 1..5),
        cut in any::<prop::sample::Index>(),
    ) {
        let wire = encode_batch(&payloads).unwrap();
        let last = payloads.last().map_or(0, Vec::len);
        let last_frame = 2 + last;

        // Keep every complete frame plus between 1 and last_frame - 1 bytes of the last one
        let kept = wire.len() - last_frame + 1 + cut.index(last_frame - 1);

        let (received, end) = read_all(ChunkedReader::bytewise(wire[..kept].to_vec()), 8);

        prop_assert_eq!(received.len(), payloads.len() - 1);
        let err = end.unwrap_err();
        prop_assert!(err.is_truncation(), "expected truncation, got {err:?}");
    }
}

#[test]
fn split_inside_length_prefix() {
    let wire = encode_batch([vec![0xAB; 300]]).unwrap();
    assert_eq!(&wire[..2], [0x01, 0x2C]);

    let (received, end) = read_all(ChunkedReader::new(wire.to_vec(), [1, 1, 150]), 64);
    assert_eq!(end, Ok(()));
    assert_eq!(received, [vec![0xAB; 300]]);
}

#[test]
fn zero_bytes_inside_payload_are_data() {
    let payload = Message::new(vec![0, 0, 0, 1, 0]).unwrap();
    let wire = encode_batch([payload.payload()]).unwrap();

    let (received, end) = read_all(ChunkedReader::bytewise(wire.to_vec()), 1);
    assert_eq!(end, Ok(()));
    assert_eq!(received, [vec![0, 0, 0, 1, 0]]);
}

#[test]
fn transport_failure_is_not_truncation() {
    let wire = encode_batch(["whole"]).unwrap();
    let reader = ChunkedReader::new(wire.to_vec(), [3]).then_fail(io::ErrorKind::ConnectionReset);

    let (received, end) = read_all(reader, 16);
    assert_eq!(received, [b"whole".to_vec()]);

    let err = end.unwrap_err();
    assert!(!err.is_truncation());
    assert!(matches!(err, FramingError::Transport(_)));
}
