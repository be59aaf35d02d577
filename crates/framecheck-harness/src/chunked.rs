//! In-memory streams that deliver bytes in controlled pieces.
//!
//! A real socket may hand a reader any split of the byte stream. These
//! readers make specific splits reproducible.

use std::{
    collections::VecDeque,
    io,
    pin::Pin,
    task::{Context, Poll},
};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tokio::io::{AsyncRead, ReadBuf};

/// Reader that yields its bytes in a fixed sequence of read sizes.
///
/// Each `poll_read` returns at most the next chunk size from the plan.
/// When the plan runs out the remaining bytes come in one piece. After the
/// last byte the reader reports end-of-stream, or the configured error.
#[derive(Debug, Clone)]
pub struct ChunkedReader {
    data: Vec<u8>,
    pos: usize,
    chunks: VecDeque<usize>,
    fail_with: Option<io::ErrorKind>,
}

impl ChunkedReader {
    /// Deliver `data` split into reads of the given sizes.
    ///
    /// Zero sizes are skipped; a zero-length read would signal end-of-stream.
    pub fn new(data: impl Into<Vec<u8>>, chunks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            data: data.into(),
            pos: 0,
            chunks: chunks.into_iter().filter(|&n| n > 0).collect(),
            fail_with: None,
        }
    }

    /// Deliver `data` one byte per read.
    pub fn bytewise(data: impl Into<Vec<u8>>) -> Self {
        let data = data.into();
        let len = data.len();
        Self::new(data, std::iter::repeat_n(1, len))
    }

    /// Deliver `data` in random reads of `1..=max_chunk` bytes.
    ///
    /// The split is fully determined by `seed`.
    pub fn seeded(data: impl Into<Vec<u8>>, seed: u64, max_chunk: usize) -> Self {
        let data = data.into();
        let max_chunk = max_chunk.max(1);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut chunks = Vec::new();
        let mut left = data.len();
        while left > 0 {
            let n = rng.gen_range(1..=max_chunk).min(left);
            chunks.push(n);
            left -= n;
        }

        Self::new(data, chunks)
    }

    /// Fail with `kind` instead of reporting end-of-stream.
    #[must_use]
    pub fn then_fail(mut self, kind: io::ErrorKind) -> Self {
        self.fail_with = Some(kind);
        self
    }

    /// Read sizes still to be used
    pub fn remaining_chunks(&self) -> usize {
        self.chunks.len()
    }
}

impl AsyncRead for ChunkedReader {
    fn poll_read(self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let left = this.data.len() - this.pos;

        if left == 0 {
            return match this.fail_with {
                Some(kind) => Poll::Ready(Err(io::Error::new(kind, "injected read failure"))),
                None => Poll::Ready(Ok(())),
            };
        }

        let planned = this.chunks.pop_front().unwrap_or(left);
        let n = planned.min(left).min(buf.remaining());

        buf.put_slice(&this.data[this.pos..this.pos + n]);
        this.pos += n;

        // A partially used chunk keeps its remainder for the next read
        if planned > n && n < left {
            this.chunks.push_front(planned - n);
        }

        Poll::Ready(Ok(()))
    }
}
