//! Stdio framing for MCP messages.
//!
//! Clients send either one JSON message per line or `Content-Length` framed
//! messages. Each reply is written in the framing its request arrived in.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{McpError, Result};

/// Largest `Content-Length` body accepted.
pub const MAX_MESSAGE_BYTES: usize = 16 * 1024 * 1024;

/// How a message was delimited on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// One JSON document per line.
    Line,
    /// `Content-Length: N\r\n\r\n` header followed by N bytes.
    ContentLength,
}

/// A message body with the framing it arrived in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub body: String,
    pub framing: Framing,
}

/// Reads and writes framed messages over a byte stream pair.
pub struct StdioTransport<R, W> {
    reader: R,
    writer: W,
    framing: Framing,
}

impl<R, W> StdioTransport<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            framing: Framing::Line,
        }
    }

    /// Framing of the most recent input, including input that failed to read.
    pub fn framing(&self) -> Framing {
        self.framing
    }

    /// Read the next message. Returns `None` at end of input.
    ///
    /// [`McpError::Protocol`] means the offending input was consumed and the
    /// stream can still be read.
    pub async fn read_frame(&mut self) -> Result<Option<Frame>> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line).await? == 0 {
                return Ok(None);
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if trimmed.starts_with('{') || trimmed.starts_with('[') {
                self.framing = Framing::Line;
                return Ok(Some(Frame {
                    body: trimmed.to_string(),
                    framing: Framing::Line,
                }));
            }

            self.framing = Framing::Line;
            let first = parse_content_length(trimmed)?;
            self.framing = Framing::ContentLength;
            let content_length = self.read_headers(first).await?;
            if content_length > MAX_MESSAGE_BYTES {
                return Err(McpError::protocol(format!(
                    "Content-Length {content_length} exceeds limit of {MAX_MESSAGE_BYTES} bytes"
                )));
            }

            let mut body = Vec::new();
            (&mut self.reader)
                .take(content_length as u64)
                .read_to_end(&mut body)
                .await?;
            if body.len() < content_length {
                return Err(McpError::protocol("unexpected end of input in message body"));
            }
            let body = String::from_utf8(body)
                .map_err(|e| McpError::protocol(format!("invalid UTF-8 in message: {e}")))?;

            tracing::trace!(content_length, "received framed message");
            return Ok(Some(Frame {
                body,
                framing: Framing::ContentLength,
            }));
        }
    }

    /// Consume the rest of a header block up to the blank line.
    async fn read_headers(&mut self, first: Option<usize>) -> Result<usize> {
        let mut content_length = first;
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line).await? == 0 {
                return Err(McpError::protocol("unexpected end of input in headers"));
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                break;
            }
            if let Some(len) = parse_content_length(trimmed)? {
                content_length = Some(len);
            }
        }
        content_length.ok_or_else(|| McpError::protocol("missing Content-Length header"))
    }

    /// Write `body` using `framing`.
    pub async fn write_frame(&mut self, body: &str, framing: Framing) -> Result<()> {
        match framing {
            Framing::Line => {
                self.writer.write_all(body.as_bytes()).await?;
                self.writer.write_all(b"\n").await?;
            }
            Framing::ContentLength => {
                let header = format!("Content-Length: {}\r\n\r\n", body.len());
                self.writer.write_all(header.as_bytes()).await?;
                self.writer.write_all(body.as_bytes()).await?;
            }
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Give back the underlying reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

/// `Some(n)` for a `Content-Length` header, `None` for any other header.
fn parse_content_length(header: &str) -> Result<Option<usize>> {
    let Some((name, value)) = header.split_once(':') else {
        return Err(McpError::protocol(format!("unrecognized input: {header}")));
    };
    if !name.trim().eq_ignore_ascii_case("content-length") {
        return Ok(None);
    }
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|e| McpError::protocol(format!("invalid Content-Length: {e}")))
}

#[cfg(test)]
mod tests {
    use tokio::io::BufReader;

    use super::*;

    fn transport(input: &[u8]) -> StdioTransport<BufReader<&[u8]>, Vec<u8>> {
        StdioTransport::new(BufReader::new(input), Vec::new())
    }

    #[tokio::test]
    async fn test_reads_line_delimited() {
        let mut t = transport(b"\n{\"jsonrpc\":\"2.0\",\"method\":\"ping\",\"id\":1}\n");
        let frame = t.read_frame().await.unwrap().unwrap();
        assert_eq!(frame.framing, Framing::Line);
        assert!(frame.body.contains("ping"));
        assert!(t.read_frame().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reads_content_length_framed() {
        let body = r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#;
        let input = format!(
            "Content-Length: {}\r\nContent-Type: application/json\r\n\r\n{body}",
            body.len()
        );
        let mut t = transport(input.as_bytes());
        let frame = t.read_frame().await.unwrap().unwrap();
        assert_eq!(frame.framing, Framing::ContentLength);
        assert_eq!(frame.body, body);
    }

    #[tokio::test]
    async fn test_header_without_length_is_error() {
        let mut t = transport(b"Content-Type: application/json\r\n\r\n{}");
        let err = t.read_frame().await.unwrap_err();
        assert!(err.to_string().contains("missing Content-Length"));
    }

    #[tokio::test]
    async fn test_stray_line_is_skipped() {
        let mut t = transport(b"hello\n{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n");
        let err = t.read_frame().await.unwrap_err();
        assert!(err.to_string().contains("unrecognized input: hello"));
        assert_eq!(t.framing(), Framing::Line);

        let frame = t.read_frame().await.unwrap().unwrap();
        assert!(frame.body.contains("ping"));
    }

    #[tokio::test]
    async fn test_oversized_content_length_is_rejected() {
        let mut t = transport(b"Content-Length: 18446744073709551615\r\n\r\n{}");
        let err = t.read_frame().await.unwrap_err();
        assert!(matches!(err, McpError::Protocol(_)));
        assert!(err.to_string().contains("exceeds limit"));
        assert_eq!(t.framing(), Framing::ContentLength);

        let too_big = format!("Content-Length: {}\r\n\r\n", MAX_MESSAGE_BYTES + 1);
        let mut t = transport(too_big.as_bytes());
        assert!(t.read_frame().await.is_err());
    }

    #[tokio::test]
    async fn test_truncated_body_is_error_then_end() {
        let mut t = transport(b"Content-Length: 50\r\n\r\n{\"jsonrpc\":\"2.0\"}");
        let err = t.read_frame().await.unwrap_err();
        assert!(err.to_string().contains("unexpected end of input"));
        assert!(t.read_frame().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_writes_in_requested_framing() {
        let mut t = transport(b"");
        t.write_frame("{}", Framing::Line).await.unwrap();
        t.write_frame("{\"a\":1}", Framing::ContentLength)
            .await
            .unwrap();
        let (_, out) = t.into_inner();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{}\nContent-Length: 7\r\n\r\n{\"a\":1}"
        );
    }
}
