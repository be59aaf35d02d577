//! Turmoil-based Transport implementation using TCP streams.

use std::{io, net::SocketAddr};

use async_trait::async_trait;
use framecheck_core::transport::Transport;
use tokio::io::{ReadHalf, WriteHalf};
use turmoil::net::{TcpListener, TcpStream};

/// Simulation transport using Turmoil's deterministic TCP streams.
///
/// Turmoil controls delivery order and timing, and can hold or partition
/// links, so the same test run always sees the same interleaving.
pub struct SimTransport {
    listener: TcpListener,
}

impl SimTransport {
    /// Bind inside the simulation (e.g. `"0.0.0.0:28333"`).
    ///
    /// # Errors
    ///
    /// Returns error if the address is already in use or malformed.
    pub async fn bind(address: &str) -> io::Result<Self> {
        let listener = TcpListener::bind(address).await?;
        Ok(Self { listener })
    }

    /// Connect to a simulated host (e.g. `"server:28333"`).
    ///
    /// Use `tokio::io::split()` if separate halves are needed.
    ///
    /// # Errors
    ///
    /// Returns error if the host is unknown or refuses the connection.
    pub async fn connect_to(address: &str) -> io::Result<TcpStream> {
        TcpStream::connect(address).await
    }
}

#[async_trait]
impl Transport for SimTransport {
    type SendStream = WriteHalf<TcpStream>;
    type RecvStream = ReadHalf<TcpStream>;

    async fn accept(&self) -> io::Result<(Self::SendStream, Self::RecvStream, SocketAddr)> {
        let (stream, peer) = self.listener.accept().await?;
        let (recv, send) = tokio::io::split(stream);

        Ok((send, recv, peer))
    }

    fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    use super::*;

    #[test]
    fn sim_transport_echo() {
        let mut sim = turmoil::Builder::new().build();

        sim.host("server", || async {
            let transport = SimTransport::bind("0.0.0.0:28333").await?;
            let (mut send, mut recv, _peer) = transport.accept().await?;

            let mut buf = [0u8; 5];
            recv.read_exact(&mut buf).await?;
            send.write_all(&buf).await?;

            Ok(())
        });

        sim.client("client", async {
            let mut stream = SimTransport::connect_to("server:28333").await?;
            stream.write_all(b"hello").await?;

            let mut buf = [0u8; 5];
            stream.read_exact(&mut buf).await?;
            assert_eq!(&buf, b"hello");

            Ok(())
        });

        sim.run().unwrap();
    }
}
