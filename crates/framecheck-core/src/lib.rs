//! Async I/O for framecheck.
//!
//! Builds on the pure wire logic in `framecheck-proto`:
//!
//! - [`FrameReader`] / [`FrameWriter`]: length-prefixed messages over any
//!   tokio byte stream, one reader and one writer per connection
//! - [`drain_messages`]: the per-connection receive loop
//! - [`Transport`]: listener abstraction, with [`TcpTransport`] for real
//!   sockets (the simulated transport lives in `framecheck-harness`)
//! - [`batch`]: fork-join checksum validation of captured segments
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod batch;
pub mod error;
pub mod reader;
pub mod session;
pub mod transport;
pub mod writer;

pub use batch::{BatchConfig, BatchReport, CaseId, CaseOutcome, run_batch, run_case};
pub use error::{CaseError, FramingError};
pub use reader::FrameReader;
pub use session::drain_messages;
pub use transport::{TcpTransport, Transport};
pub use writer::FrameWriter;
