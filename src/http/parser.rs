use std::collections::HashMap;
use std::fmt;
use std::io;

use tokio::io::AsyncRead;

use crate::http::line::LineReader;
use crate::http::request::{HTTP_1_1, Method, Request, canonical_header_key, is_valid_header_key};

/// Largest start line plus header block accepted for one request.
pub const MAX_HEADER_BYTES: usize = 64 * 1024;

/// Why reading a request failed.
///
/// The first six variants are protocol violations and get a 400. `Closed`
/// and `Io` mean the peer is gone or the stream is unusable; nothing is
/// sent back.
#[derive(Debug)]
pub enum ParseError {
    MalformedStartLine,
    InvalidMethod,
    InvalidProto,
    InvalidUrl,
    MalformedHeaderLine,
    /// The stream ended inside the header block.
    MalformedBody,
    /// The peer closed the connection before sending anything.
    Closed,
    Io { error: io::Error, partial: bool },
}

impl ParseError {
    /// Whether some bytes of a request were read before the failure.
    pub fn bytes_received(&self) -> bool {
        match self {
            ParseError::Closed => false,
            ParseError::Io { partial, .. } => *partial,
            _ => true,
        }
    }

    /// Whether the client should be answered with 400 Bad Request.
    pub fn is_bad_request(&self) -> bool {
        !matches!(self, ParseError::Closed | ParseError::Io { .. })
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MalformedStartLine => f.write_str("malformed start line"),
            ParseError::InvalidMethod => f.write_str("invalid method"),
            ParseError::InvalidProto => f.write_str("invalid proto"),
            ParseError::InvalidUrl => f.write_str("invalid url"),
            ParseError::MalformedHeaderLine => f.write_str("malformed header line"),
            ParseError::MalformedBody => f.write_str("stream ended inside header block"),
            ParseError::Closed => f.write_str("connection closed by peer"),
            ParseError::Io { error, .. } => write!(f, "read failed: {}", error),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Reads and validates the next request from `lines`.
pub async fn parse_request<R>(lines: &mut LineReader<R>) -> Result<Request, ParseError>
where
    R: AsyncRead + Unpin,
{
    lines.begin_request();

    // Start line
    let start = match lines.read_line().await {
        Ok(line) => line,
        Err(error) => {
            let partial = lines.pending();
            if error.kind() == io::ErrorKind::UnexpectedEof && !partial {
                return Err(ParseError::Closed);
            }
            return Err(ParseError::Io { error, partial });
        }
    };

    let start = std::str::from_utf8(&start).map_err(|_| ParseError::MalformedStartLine)?;
    let (method, url, proto) = parse_start_line(start)?;

    let method = Method::from_str(method).ok_or(ParseError::InvalidMethod)?;
    if proto != HTTP_1_1 {
        return Err(ParseError::InvalidProto);
    }
    if !url.starts_with('/') {
        return Err(ParseError::InvalidUrl);
    }

    // Headers
    let mut headers = HashMap::new();
    let mut host = String::new();
    let mut close = false;

    loop {
        let line = match lines.read_line().await {
            Ok(line) => line,
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => {
                return Err(ParseError::MalformedBody);
            }
            Err(error) => return Err(ParseError::Io { error, partial: true }),
        };

        if line.is_empty() {
            break;
        }

        if lines.consumed() > MAX_HEADER_BYTES {
            let error = io::Error::new(io::ErrorKind::InvalidData, "header block too large");
            return Err(ParseError::Io { error, partial: true });
        }

        let line = std::str::from_utf8(&line).map_err(|_| ParseError::MalformedHeaderLine)?;
        let (key, value) = parse_header_line(line)?;

        if key == "Host" {
            host = value.to_string();
        } else if key.eq_ignore_ascii_case("Connection") {
            // Only the literal "close" has any effect.
            if value == "close" {
                close = true;
            }
        } else {
            headers.insert(key, value.to_string());
        }
    }

    Ok(Request {
        method,
        url: url.to_string(),
        proto: proto.to_string(),
        headers,
        host,
        close,
    })
}

/// Splits a start line on its first two spaces.
fn parse_start_line(line: &str) -> Result<(&str, &str, &str), ParseError> {
    let mut parts = line.splitn(3, ' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(method), Some(url), Some(proto)) => Ok((method, url, proto)),
        _ => Err(ParseError::MalformedStartLine),
    }
}

/// Splits `Key: Value`, returning the canonical key and the value.
fn parse_header_line(line: &str) -> Result<(String, &str), ParseError> {
    let (key, value) = line.split_once(':').ok_or(ParseError::MalformedHeaderLine)?;

    let key = key.trim_start_matches(' ');
    let value = value.trim_start_matches(' ');

    if !is_valid_header_key(key) || value.contains(['\r', '\n']) {
        return Err(ParseError::MalformedHeaderLine);
    }

    Ok((canonical_header_key(key), value))
}
