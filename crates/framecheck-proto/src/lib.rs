//! Wire formats for framecheck.
//!
//! Two independent binary formats share this crate:
//!
//! - **Framing**: a stream of `[u16 BE length][payload]` frames. The
//!   [`encode`] family writes frames; [`FrameDecoder`] reassembles them from
//!   arbitrarily fragmented input.
//! - **Checksums**: the IPv4 [`PseudoHeader`] and the RFC 1071 Internet
//!   checksum, combined in [`validate`] to check a captured TCP segment.
//!
//! Everything here is pure: no I/O, no clocks, no shared state. Async
//! readers and writers live in `framecheck-core`.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod checksum;
pub mod decoder;
pub mod errors;
pub mod frame;
pub mod pseudo_header;
pub mod validate;

pub use decoder::FrameDecoder;
pub use errors::{ProtocolError, Result};
pub use frame::{LENGTH_PREFIX_SIZE, MAX_PAYLOAD_SIZE, Message, encode, encode_batch, encode_into};
pub use pseudo_header::{PROTOCOL_TCP, PseudoHeader};
pub use validate::{ValidationResult, validate};
