#![no_main]

use std::net::Ipv4Addr;

use framecheck_proto::{ProtocolError, validate};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let (addrs, segment) = data.split_at(8);
    let src = Ipv4Addr::new(addrs[0], addrs[1], addrs[2], addrs[3]);
    let dst = Ipv4Addr::new(addrs[4], addrs[5], addrs[6], addrs[7]);

    let before = segment.to_vec();
    match validate(segment, src, dst) {
        Ok(result) => {
            assert!(segment.len() >= 18);
            assert_eq!(result.original, u16::from_be_bytes([segment[16], segment[17]]));
        },
        Err(ProtocolError::SegmentTooShort { actual, .. }) => assert_eq!(actual, segment.len()),
        Err(ProtocolError::SegmentTooLong { size, .. }) => assert_eq!(size, segment.len()),
        Err(e) => panic!("unexpected error: {e}"),
    }
    assert_eq!(segment, &before[..]);
});
