//! `framecheck fetch`: print every word the server sends.

use std::io::Write;

use framecheck_core::{FrameReader, FramingError, drain_messages};
use tokio::io::AsyncRead;

/// Render a payload for display: lossy UTF-8, or lowercase hex.
pub fn render(payload: &[u8], as_hex: bool) -> String {
    if as_hex { hex::encode(payload) } else { String::from_utf8_lossy(payload).into_owned() }
}

/// Print each message on its own line as it arrives.
///
/// Returns the number of messages printed once the server closes cleanly.
pub async fn print_messages<R, W>(reader: &mut FrameReader<R>, out: &mut W, as_hex: bool) -> Result<usize, FramingError>
where
    R: AsyncRead + Unpin,
    W: Write,
{
    writeln!(out, "Getting words:")?;

    drain_messages(reader, |message| {
        writeln!(out, "{}", render(message.payload(), as_hex))?;
        out.flush()
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(words: &[&[u8]]) -> Vec<u8> {
        let mut wire = Vec::new();
        for word in words {
            wire.extend_from_slice(&(word.len() as u16).to_be_bytes());
            wire.extend_from_slice(word);
        }
        wire
    }

    #[tokio::test]
    async fn prints_one_line_per_word() {
        let wire = frames(&[b"meadow", b"quartz"]);
        let mut reader = FrameReader::with_chunk_size(&wire[..], 3);
        let mut out = Vec::new();

        let count = print_messages(&mut reader, &mut out, false).await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "Getting words:\nmeadow\nquartz\n");
    }

    #[tokio::test]
    async fn hex_mode() {
        let wire = frames(&[&[0x00, 0xff, 0x10]]);
        let mut reader = FrameReader::new(&wire[..]);
        let mut out = Vec::new();

        print_messages(&mut reader, &mut out, true).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Getting words:\n00ff10\n");
    }

    #[tokio::test]
    async fn truncated_stream_keeps_printed_words() {
        let mut wire = frames(&[b"tundra", b"willow"]);
        wire.truncate(wire.len() - 1);

        let mut reader = FrameReader::new(&wire[..]);
        let mut out = Vec::new();

        let err = print_messages(&mut reader, &mut out, false).await.unwrap_err();
        assert!(err.is_truncation());
        assert_eq!(String::from_utf8(out).unwrap(), "Getting words:\ntundra\n");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        assert_eq!(render(&[b'o', 0xff, b'k'], false), "o\u{fffd}k");
    }
}
