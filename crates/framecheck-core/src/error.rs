//! Error types for framecheck I/O and batch validation.
//!
//! This module provides strongly-typed errors for the two pipelines:
//! - Framing errors (truncated messages, transport failures)
//! - Case errors (missing or malformed validation inputs)
//!
//! Transport errors are stored as strings so both enums stay `Clone` and
//! `PartialEq` for tests, as `std::io::Error` is neither.

use std::{io, path::PathBuf};

use framecheck_proto::ProtocolError;
use thiserror::Error;

use crate::batch::CaseId;

/// Errors that end a framed connection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FramingError {
    /// Wire-level violation (truncated message, oversized payload)
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Underlying read or write failed
    #[error("transport error: {0}")]
    Transport(String),

    /// The caller's message handler gave up
    #[error("message consumer failed: {0}")]
    Consumer(String),
}

impl FramingError {
    /// Returns true if the peer closed the stream mid-message.
    ///
    /// A truncation is a protocol violation, distinct from both a clean
    /// end-of-stream (which is not an error at all) and a transport failure.
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::Protocol(err) if err.is_truncation())
    }
}

/// Convert io::Error to FramingError (for transport errors)
impl From<io::Error> for FramingError {
    fn from(err: io::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Errors that fail a single validation case.
///
/// These never abort a batch: each one is recorded in its case's outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaseError {
    /// Address file or data file is absent
    #[error("file set missing for case {case}: {}", .path.display())]
    MissingFiles {
        /// Case being located
        case: CaseId,
        /// First missing file
        path: PathBuf,
    },

    /// A case file exists but could not be read
    #[error("failed to read {}: {reason}", .path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        reason: String,
    },

    /// Address file does not hold exactly two addresses
    #[error("expected 2 addresses, found {found}")]
    AddressCount {
        /// Number of whitespace-separated fields found
        found: usize,
    },

    /// Address is not a dotted-quad IPv4 address
    #[error("malformed IPv4 address: {input:?}")]
    MalformedAddress {
        /// Offending text
        input: String,
    },

    /// Segment cannot be validated
    #[error("malformed segment: {0}")]
    Segment(#[from] ProtocolError),

    /// The case's task panicked or was cancelled
    #[error("validation task failed: {reason}")]
    TaskFailed {
        /// Join error description
        reason: String,
    },
}
