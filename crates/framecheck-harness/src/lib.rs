//! Deterministic test harness for framecheck.
//!
//! - [`SimTransport`]: Turmoil implementation of the `Transport` trait for
//!   reproducible network tests
//! - [`ChunkedReader`]: in-memory stream with a controlled read split and
//!   optional injected failure

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod chunked;
pub mod sim_transport;

pub use chunked::ChunkedReader;
pub use sim_transport::SimTransport;
