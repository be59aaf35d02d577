//! Error types for the framecheck wire formats.
//!
//! All errors are structured, testable, and provide actionable information.

use thiserror::Error;

/// Protocol-level errors raised while framing, deframing, or validating
/// segments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    // Framing errors
    /// Payload does not fit in the 16-bit length prefix
    #[error("payload too large: {size} bytes exceeds maximum {max}")]
    PayloadTooLarge {
        /// Actual payload size
        size: usize,
        /// Maximum allowed size
        max: usize,
    },

    /// Stream ended inside a length prefix
    #[error("message truncated: stream ended after {received} of 2 length prefix bytes")]
    TruncatedPrefix {
        /// Prefix bytes received before the stream ended
        received: usize,
    },

    /// Stream ended inside a payload
    #[error("message truncated: prefix claims {expected} payload bytes, but only {actual} arrived")]
    TruncatedPayload {
        /// Payload size announced by the prefix
        expected: usize,
        /// Payload bytes received before the stream ended
        actual: usize,
    },

    /// Buffer is shorter than a fixed-size record
    #[error("buffer too short: expected at least {expected} bytes, got {actual}")]
    FrameTooShort {
        /// Expected minimum size in bytes
        expected: usize,
        /// Actual size received
        actual: usize,
    },

    // Segment errors
    /// Segment cannot contain the checksum field
    #[error("segment too short: checksum field needs {expected} bytes, got {actual}")]
    SegmentTooShort {
        /// Minimum segment size holding the checksum field
        expected: usize,
        /// Actual segment size
        actual: usize,
    },

    /// Segment length does not fit the pseudo-header length field
    #[error("segment too long: {size} bytes exceeds maximum {max}")]
    SegmentTooLong {
        /// Actual segment size
        size: usize,
        /// Maximum segment size
        max: usize,
    },
}

impl ProtocolError {
    /// Returns true if the peer closed the stream partway through a message.
    ///
    /// Truncation is distinct from a clean end-of-stream: it means the
    /// sender died or misbehaved mid-frame.
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::TruncatedPrefix { .. } | Self::TruncatedPayload { .. })
    }
}

/// Convenient Result type alias for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;
