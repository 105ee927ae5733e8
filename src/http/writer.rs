use std::fmt::Write as _;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.0";

/// Renders status line, headers and body into one contiguous buffer.
pub fn serialize_response(resp: &Response) -> BytesMut {
    let mut buf = BytesMut::with_capacity(128 + resp.body.len());

    // Writing into a BytesMut cannot fail.
    let _ = write!(
        buf,
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );

    let mut headers: Vec<_> = resp.headers.iter().collect();
    headers.sort();
    for (k, v) in headers {
        let _ = write!(buf, "{}: {}\r\n", k, v);
    }

    buf.extend_from_slice(b"\r\n");
    buf.extend_from_slice(&resp.body);
    buf
}

/// Writes a serialized response, resuming where a short write left off.
pub struct ResponseWriter {
    buffer: BytesMut,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
        }
    }

    pub fn remaining(&self) -> usize {
        self.buffer.remaining()
    }

    /// Writes everything left in the buffer and flushes `stream`.
    pub async fn write_to<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.buffer.has_remaining() {
            let n = stream.write(self.buffer.chunk()).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.buffer.advance(n);
        }

        stream.flush().await?;
        Ok(())
    }
}
