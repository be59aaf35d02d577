//! Word server.
//!
//! Every accepted connection receives a random batch of words, each framed
//! as `[u16 BE length][word]`, after which the server closes its write half.
//! Generic over [`framecheck_core::Transport`] so tests can run it on a
//! simulated network.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod server;
pub mod words;

pub use config::{DEFAULT_PORT, ServerConfig};
pub use error::ServerError;
pub use server::{WordServer, handle_connection};
pub use words::WORDS;
