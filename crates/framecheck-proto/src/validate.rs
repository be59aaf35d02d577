//! Segment checksum validation.
//!
//! Compares the checksum a captured TCP segment carries against the one
//! recomputed from the segment and its endpoint addresses.

use std::{fmt, net::Ipv4Addr};

use crate::{
    checksum::{CHECKSUM_OFFSET, MIN_SEGMENT_SIZE, segment_checksum},
    errors::{ProtocolError, Result},
    pseudo_header::{PROTOCOL_TCP, PseudoHeader},
};

/// Outcome of validating one segment.
///
/// A mismatch is a normal result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationResult {
    /// Checksum carried in the captured segment
    pub original: u16,
    /// Checksum recomputed over pseudo-header and segment
    pub computed: u16,
}

impl ValidationResult {
    /// True when the carried checksum matches the recomputed one
    pub fn passed(&self) -> bool {
        self.original == self.computed
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            write!(f, "PASS")
        } else {
            write!(f, "FAIL (expected {:04x}, got {:04x})", self.original, self.computed)
        }
    }
}

/// Read the checksum field the segment carries.
///
/// # Errors
///
/// Returns [`ProtocolError::SegmentTooShort`] if the field is out of range.
pub fn original_checksum(segment: &[u8]) -> Result<u16> {
    match segment.get(CHECKSUM_OFFSET..MIN_SEGMENT_SIZE) {
        Some(&[hi, lo]) => Ok(u16::from_be_bytes([hi, lo])),
        _ => Err(ProtocolError::SegmentTooShort {
            expected: MIN_SEGMENT_SIZE,
            actual: segment.len(),
        }),
    }
}

/// Validate a TCP segment captured between `source` and `destination`.
///
/// # Errors
///
/// - [`ProtocolError::SegmentTooShort`] if the segment cannot hold the
///   checksum field
/// - [`ProtocolError::SegmentTooLong`] if its length does not fit the
///   pseudo-header length field
pub fn validate(segment: &[u8], source: Ipv4Addr, destination: Ipv4Addr) -> Result<ValidationResult> {
    let original = original_checksum(segment)?;
    let header = PseudoHeader::for_segment(source, destination, PROTOCOL_TCP, segment)?;
    let computed = segment_checksum(&header, segment)?;

    Ok(ValidationResult { original, computed })
}
