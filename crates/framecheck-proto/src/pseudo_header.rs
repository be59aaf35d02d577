//! IPv4 pseudo-header for transport-layer checksums.
//!
//! The pseudo-header is never transmitted. It is prepended to a segment
//! only as checksum input, binding the segment to its endpoint addresses
//! and protocol number.

use std::net::Ipv4Addr;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{
    checksum::MAX_SEGMENT_SIZE,
    errors::{ProtocolError, Result},
};

/// IP protocol number for TCP
pub const PROTOCOL_TCP: u8 = 6;

/// Fixed 12-byte pseudo-header (Big Endian network byte order)
///
/// ```text
/// 0        4        8    9    10       12
/// ┌────────┬────────┬────┬────┬────────┐
/// │ source │ dest   │ 0  │ pr │ length │
/// └────────┴────────┴────┴────┴────────┘
/// ```
///
/// Fields are stored as raw byte arrays so the struct has alignment 1 and
/// no padding, which lets `zerocopy` cast it to and from wire bytes.
///
/// # Invariants
///
/// - `reserved` is always zero.
/// - `segment_length` is the byte length of the segment being
///   checksummed, never the pseudo-header's own length.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct PseudoHeader {
    source: [u8; 4],
    destination: [u8; 4],
    reserved: u8,
    protocol: u8,
    segment_length: [u8; 2],
}

impl PseudoHeader {
    /// Size of the pseudo-header in bytes
    pub const SIZE: usize = 12;

    /// Build a pseudo-header from its fields.
    pub fn new(source: Ipv4Addr, destination: Ipv4Addr, protocol: u8, segment_length: u16) -> Self {
        Self {
            source: source.octets(),
            destination: destination.octets(),
            reserved: 0,
            protocol,
            segment_length: segment_length.to_be_bytes(),
        }
    }

    /// Build a TCP pseudo-header (protocol 6).
    pub fn tcp(source: Ipv4Addr, destination: Ipv4Addr, segment_length: u16) -> Self {
        Self::new(source, destination, PROTOCOL_TCP, segment_length)
    }

    /// Build a pseudo-header whose length field matches `segment`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::SegmentTooLong`] if the segment length does
    /// not fit in 16 bits.
    pub fn for_segment(
        source: Ipv4Addr,
        destination: Ipv4Addr,
        protocol: u8,
        segment: &[u8],
    ) -> Result<Self> {
        let length = u16::try_from(segment.len()).map_err(|_| ProtocolError::SegmentTooLong {
            size: segment.len(),
            max: MAX_SEGMENT_SIZE,
        })?;

        Ok(Self::new(source, destination, protocol, length))
    }

    /// Parse a pseudo-header from the front of `bytes` (zero-copy).
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::FrameTooShort`] if fewer than
    /// [`Self::SIZE`] bytes are given.
    pub fn from_bytes(bytes: &[u8]) -> Result<&Self> {
        Self::ref_from_prefix(bytes)
            .map(|(header, _rest)| header)
            .map_err(|_| ProtocolError::FrameTooShort { expected: Self::SIZE, actual: bytes.len() })
    }

    /// Serialize to the 12-byte wire layout.
    #[must_use]
    #[allow(clippy::wrong_self_convention)]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut arr = [0u8; Self::SIZE];
        arr.copy_from_slice(IntoBytes::as_bytes(self));
        arr
    }

    /// Source address
    pub fn source(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.source)
    }

    /// Destination address
    pub fn destination(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.destination)
    }

    /// IP protocol number
    pub fn protocol(&self) -> u8 {
        self.protocol
    }

    /// Segment length carried in the header
    pub fn segment_length(&self) -> u16 {
        u16::from_be_bytes(self.segment_length)
    }
}

const _: () = assert!(size_of::<PseudoHeader>() == PseudoHeader::SIZE);
