//! Word server accept loop and connection handler.

use std::net::SocketAddr;

use framecheck_core::{FrameWriter, FramingError, Transport};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tokio::io::AsyncWrite;
use tracing::{info, warn};

use crate::{config::ServerConfig, error::ServerError, words::pick_words};

/// Serves a random batch of words to every connection, then closes it.
///
/// Each connection runs in its own task with its own RNG, seeded from the
/// accept loop's RNG. With a fixed seed the words sent to the n-th
/// connection are reproducible.
pub struct WordServer<T: Transport> {
    transport: T,
    config: ServerConfig,
    rng: ChaCha8Rng,
}

impl<T: Transport> WordServer<T> {
    /// Create a server on an already-bound transport.
    ///
    /// # Errors
    ///
    /// - [`ServerError::InvalidConfig`] if the word range is empty
    /// - [`ServerError::Entropy`] if no seed was given and the OS RNG failed
    pub fn new(transport: T, config: ServerConfig) -> Result<Self, ServerError> {
        config.validate()?;

        let seed = match config.seed {
            Some(seed) => seed,
            None => getrandom::u64().map_err(|e| ServerError::Entropy(e.to_string()))?,
        };

        Ok(Self { transport, config, rng: ChaCha8Rng::seed_from_u64(seed) })
    }

    /// Accept connections until the task is dropped.
    ///
    /// Accept failures are logged and the loop continues.
    pub async fn run(mut self) -> Result<(), ServerError> {
        let local = self.transport.local_addr()?;
        info!(addr = %local, "waiting for connections");

        loop {
            let (send, _recv, peer) = match self.transport.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(error = %e, "accept failed");
                    continue;
                },
            };

            let rng = ChaCha8Rng::seed_from_u64(self.rng.next_u64());
            let (min, max) = (self.config.min_words, self.config.max_words);

            tokio::spawn(async move {
                if let Err(e) = handle_connection(send, peer, rng, min, max).await {
                    warn!(peer = %peer, error = %e, "failed to send words");
                }
            });
        }
    }
}

/// Send one batch of `min..=max` words to `peer` and close the stream.
///
/// Returns the words sent.
///
/// # Errors
///
/// Returns [`FramingError::Transport`] if the write or shutdown fails.
pub async fn handle_connection<W>(
    send: W,
    peer: SocketAddr,
    mut rng: ChaCha8Rng,
    min: usize,
    max: usize,
) -> Result<Vec<&'static str>, FramingError>
where
    W: AsyncWrite + Unpin,
{
    info!(peer = %peer, "got connection");

    let words = pick_words(&mut rng, min, max);

    let mut writer = FrameWriter::new(send);
    writer.send_batch(&words).await?;
    writer.shutdown().await?;

    info!(peer = %peer, words = %words.join(","), "sent words");
    Ok(words)
}
