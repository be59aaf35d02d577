#![no_main]

use framecheck_proto::{FrameDecoder, encode_batch};
use libfuzzer_sys::fuzz_target;

// First byte picks the feed size; the rest is the stream.
fuzz_target!(|data: &[u8]| {
    let Some((&step, stream)) = data.split_first() else {
        return;
    };
    let step = usize::from(step).max(1);

    let mut decoder = FrameDecoder::new();
    let mut payloads = Vec::new();

    for piece in stream.chunks(step) {
        decoder.feed(piece);
        while let Some(message) = decoder.decode() {
            payloads.push(message.into_payload());
        }
    }

    // Decoded frames re-encode to exactly the consumed prefix
    let consumed = stream.len() - decoder.buffered();
    let reencoded = encode_batch(&payloads).unwrap();
    assert_eq!(&reencoded[..], &stream[..consumed]);

    // Leftover bytes are a truncation, never a clean end
    assert_eq!(decoder.finish().is_ok(), decoder.buffered() == 0);
});
