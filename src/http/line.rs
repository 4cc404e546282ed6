use bytes::{Bytes, BytesMut};
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Longest line accepted before the terminator shows up.
pub const MAX_LINE_LEN: usize = 8 * 1024;

/// Reads CRLF-terminated lines from a byte stream.
///
/// Bytes past the terminator stay in the internal buffer, so a request that
/// arrives in the same segment as the previous one is not lost.
pub struct LineReader<R> {
    inner: R,
    buffer: BytesMut,
    consumed: usize,
}

impl<R> LineReader<R>
where
    R: AsyncRead + Unpin,
{
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buffer: BytesMut::with_capacity(4096),
            consumed: 0,
        }
    }

    /// Returns the next line without its `\r\n`.
    ///
    /// Fails with `UnexpectedEof` if the stream ends before a terminator,
    /// and with `InvalidData` if the line grows beyond [`MAX_LINE_LEN`].
    pub async fn read_line(&mut self) -> io::Result<Bytes> {
        let mut scanned = 0;
        loop {
            if let Some(pos) = find_crlf(&self.buffer[scanned..]) {
                let end = scanned + pos;
                let mut line = self.buffer.split_to(end + 2);
                line.truncate(end);
                self.consumed += end + 2;
                return Ok(line.freeze());
            }

            // A lone '\r' at the tail may still pair with the next read.
            scanned = self.buffer.len().saturating_sub(1);

            if self.buffer.len() > MAX_LINE_LEN {
                return Err(io::Error::new(io::ErrorKind::InvalidData, "line too long"));
            }

            let n = self.inner.read_buf(&mut self.buffer).await?;
            if n == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "stream closed before end of line",
                ));
            }
        }
    }

    /// Marks the start of a new request for [`pending`](Self::pending).
    pub fn begin_request(&mut self) {
        self.consumed = 0;
    }

    /// Bytes of the current request taken off the buffer so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Whether any byte of the current request has been received.
    pub fn pending(&self) -> bool {
        self.consumed > 0 || !self.buffer.is_empty()
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }
}

fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}
