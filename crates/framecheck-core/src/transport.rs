//! Transport abstraction for stream-oriented servers.
//!
//! Production uses tokio TCP, tests use Turmoil (simulated TCP). Framing
//! only needs an ordered byte stream in each direction, so that is all the
//! trait exposes.

use std::{io, net::SocketAddr};

use async_trait::async_trait;
use tokio::{
    io::{AsyncRead, AsyncWrite},
    net::{
        TcpListener, ToSocketAddrs,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
};

/// Listening side of a byte-stream transport.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Write half of an accepted connection.
    type SendStream: AsyncWrite + Unpin + Send + 'static;

    /// Read half of an accepted connection.
    type RecvStream: AsyncRead + Unpin + Send + 'static;

    /// Accept the next incoming connection.
    ///
    /// Returns the split halves and the peer address.
    async fn accept(&self) -> io::Result<(Self::SendStream, Self::RecvStream, SocketAddr)>;

    /// Address this transport is listening on.
    fn local_addr(&self) -> io::Result<SocketAddr>;
}

/// Real TCP transport backed by a tokio listener.
#[derive(Debug)]
pub struct TcpTransport {
    listener: TcpListener,
}

impl TcpTransport {
    /// Bind a listener.
    ///
    /// # Errors
    ///
    /// Returns error if the address is in use or cannot be resolved.
    pub async fn bind(addr: impl ToSocketAddrs) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener })
    }
}

#[async_trait]
impl Transport for TcpTransport {
    type SendStream = OwnedWriteHalf;
    type RecvStream = OwnedReadHalf;

    async fn accept(&self) -> io::Result<(Self::SendStream, Self::RecvStream, SocketAddr)> {
        let (stream, peer) = self.listener.accept().await?;
        stream.set_nodelay(true)?;

        let (recv, send) = stream.into_split();
        Ok((send, recv, peer))
    }

    fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}
