//! Internet checksum (RFC 1071).
//!
//! The checksum is the one's complement of the one's-complement sum of all
//! 16-bit big-endian words. Carries out of bit 15 are folded back into the
//! low 16 bits ("end-around carry").

use crate::{
    errors::{ProtocolError, Result},
    pseudo_header::PseudoHeader,
};

/// Byte offset of the checksum field inside a segment
pub const CHECKSUM_OFFSET: usize = 16;

/// Smallest segment that still holds the whole checksum field
pub const MIN_SEGMENT_SIZE: usize = CHECKSUM_OFFSET + 2;

/// Largest segment the pseudo-header length field can describe
pub const MAX_SEGMENT_SIZE: usize = u16::MAX as usize;

/// Sum big-endian 16-bit words into a 32-bit accumulator.
///
/// `words` must have even length; callers pad odd inputs with a zero byte
/// first. Inputs up to [`MAX_SEGMENT_SIZE`] plus a pseudo-header cannot
/// overflow the accumulator.
pub fn accumulate(words: &[u8]) -> u32 {
    debug_assert!(words.len() % 2 == 0, "checksum input must be padded to even length");

    words
        .chunks_exact(2)
        .map(|pair| u32::from(u16::from_be_bytes([pair[0], pair[1]])))
        .sum()
}

/// Fold carries above bit 15 back into the low 16 bits.
///
/// One fold is not always enough: adding the carry back can itself carry
/// (`0x1FFFF -> 0x10000 -> 0x0001`), so this loops until the high half is
/// clear.
pub fn fold(mut sum: u32) -> u16 {
    while sum >> 16 != 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }
    sum as u16
}

/// Internet checksum of an even-length buffer.
pub fn internet_checksum(words: &[u8]) -> u16 {
    !fold(accumulate(words))
}

/// Compute a segment's checksum as the sender should have.
///
/// Works on a scratch copy: the checksum field at
/// [`CHECKSUM_OFFSET`]..[`MIN_SEGMENT_SIZE`] is zeroed in the copy, the
/// pseudo-header is prepended, and a single zero byte is appended when the
/// total length is odd. `segment` itself is never modified.
///
/// # Errors
///
/// - [`ProtocolError::SegmentTooShort`] if the segment cannot hold the
///   checksum field
/// - [`ProtocolError::SegmentTooLong`] if the segment does not fit the
///   pseudo-header's 16-bit length field
pub fn segment_checksum(header: &PseudoHeader, segment: &[u8]) -> Result<u16> {
    if segment.len() < MIN_SEGMENT_SIZE {
        return Err(ProtocolError::SegmentTooShort {
            expected: MIN_SEGMENT_SIZE,
            actual: segment.len(),
        });
    }
    if segment.len() > MAX_SEGMENT_SIZE {
        return Err(ProtocolError::SegmentTooLong { size: segment.len(), max: MAX_SEGMENT_SIZE });
    }

    let mut scratch = Vec::with_capacity(PseudoHeader::SIZE + segment.len() + 1);
    scratch.extend_from_slice(&header.to_bytes());
    scratch.extend_from_slice(segment);

    let field = PseudoHeader::SIZE + CHECKSUM_OFFSET;
    scratch[field..field + 2].fill(0);

    if scratch.len() % 2 != 0 {
        scratch.push(0);
    }
    debug_assert!(scratch.len() % 2 == 0);

    Ok(internet_checksum(&scratch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_single_carry() {
        assert_eq!(fold(0xFFFF + 0x0001), 0x0001);
    }

    #[test]
    fn fold_cascading_carry() {
        // First fold yields 0x10000, which needs a second round
        assert_eq!(fold(0x0001_FFFF), 0x0001);
        assert_eq!(fold(0xFFFF_FFFF), 0xFFFF);
    }

    #[test]
    fn fold_without_carry_is_identity() {
        assert_eq!(fold(0x1234), 0x1234);
        assert_eq!(fold(0), 0);
    }

    #[test]
    fn complement_after_fold() {
        assert_eq!(internet_checksum(&[0xFF, 0xFF, 0x00, 0x01]), 0xFFFE);
    }

    #[test]
    fn empty_input() {
        assert_eq!(internet_checksum(&[]), 0xFFFF);
    }

    #[test]
    fn accumulate_reads_big_endian_words() {
        assert_eq!(accumulate(&[0x00, 0x01, 0x00, 0x02]), 0x0003);
        assert_eq!(accumulate(&[0x12, 0x34]), 0x1234);
    }

    #[test]
    fn rfc1071_example() {
        // RFC 1071 section 3: sum of these words is 0x2ddf0, folded 0xddf2
        let data = [0x00, 0x01, 0xf2, 0x03, 0xf4, 0xf5, 0xf6, 0xf7];
        assert_eq!(fold(accumulate(&data)), 0xddf2);
        assert_eq!(internet_checksum(&data), !0xddf2);
    }

    #[test]
    fn reject_segment_longer_than_length_field() {
        let header = PseudoHeader::tcp([192, 168, 1, 1].into(), [192, 168, 1, 2].into(), u16::MAX);
        let segment = vec![0xFF; 200_000];

        assert_eq!(
            segment_checksum(&header, &segment),
            Err(ProtocolError::SegmentTooLong { size: 200_000, max: 65_535 })
        );
    }

    #[test]
    fn largest_segment_does_not_overflow() {
        let header = PseudoHeader::tcp([255; 4].into(), [255; 4].into(), u16::MAX);
        let segment = vec![0xFF; MAX_SEGMENT_SIZE];

        assert!(segment_checksum(&header, &segment).is_ok());
    }

    #[test]
    fn appending_checksum_sums_to_zero() {
        let data = [0x45, 0x00, 0x00, 0x3c];
        let checksum = internet_checksum(&data);

        let mut with_checksum = data.to_vec();
        with_checksum.extend_from_slice(&checksum.to_be_bytes());

        assert_eq!(internet_checksum(&with_checksum), 0);
    }
}
