//! Server errors.

use std::io;

use thiserror::Error;

/// Errors that stop the server.
///
/// Per-connection failures are logged and never surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServerError {
    /// Configuration rejected before startup
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Listener could not be set up
    #[error("transport error: {0}")]
    Transport(String),

    /// No seed given and the OS entropy source failed
    #[error("failed to seed RNG: {0}")]
    Entropy(String),
}

impl From<io::Error> for ServerError {
    fn from(err: io::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
