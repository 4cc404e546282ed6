use anyhow::Context;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

/// Default size of the chunks a file body is streamed in.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Serializes the status line, the sorted headers and the blank line that
/// ends the header block.
///
/// Header order depends only on the key set, so the same response always
/// serializes to the same bytes.
pub fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        resp.proto,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers, BTreeMap iterates in key order
    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf
}

/// Writes responses, streaming file bodies in bounded chunks.
pub struct ResponseWriter {
    chunk_size: usize,
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl ResponseWriter {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    /// Writes `resp` to `stream` and flushes.
    ///
    /// A failure while streaming the body leaves a truncated response on
    /// the wire; the caller must close the connection.
    pub async fn write_to_stream<W>(&self, resp: &Response, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        stream
            .write_all(&serialize_head(resp))
            .await
            .context("writing response head")?;

        if let Some(path) = &resp.file_path {
            let mut file = File::open(path)
                .await
                .with_context(|| format!("opening {}", path.display()))?;
            let len = match resp.content_length() {
                Some(len) => len,
                None => file.metadata().await?.len(),
            };
            self.stream_body(&mut file, len, stream)
                .await
                .with_context(|| format!("streaming body of {}", path.display()))?;
        }

        stream.flush().await.context("flushing response")?;
        Ok(())
    }

    /// Copies exactly `len` bytes from `file` to `stream`.
    async fn stream_body<W>(&self, file: &mut File, len: u64, stream: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let mut buffer = vec![0u8; self.chunk_size];
        let mut remaining = len;

        while remaining > 0 {
            let want = remaining.min(self.chunk_size as u64) as usize;
            let chunk = &mut buffer[..want];
            file.read_exact(chunk).await?;
            stream.write_all(chunk).await?;
            remaining -= want as u64;
        }

        Ok(())
    }
}
