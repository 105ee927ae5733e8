use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite};
use tracing::debug;

use crate::http::error::RequestError;
use crate::http::request::Request;
use crate::http::text::{WHITESPACE, chomp, next_token, skip_whitespace};

/// Upper bound on a single line read. Anything longer is split and the
/// remainder is read as the following line.
pub const MAX_LINE_LEN: usize = 8192;

/// The three fields taken from a request line, borrowed from the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLine<'a> {
    pub method: &'a str,
    pub uri: &'a str,
    pub query: &'a str,
}

/// Splits `METHOD SP URI[?QUERY] SP VERSION` into its parts.
///
/// The version token, if any, is ignored. The target is split at the first
/// `?` after any leading `?` characters; a target made only of `?` is kept
/// whole as the uri.
pub fn split_request_line(line: &str) -> Result<RequestLine<'_>, RequestError> {
    let (method, rest) = next_token(line, WHITESPACE).ok_or(RequestError::MalformedMethod)?;
    let (target, _) = next_token(rest, WHITESPACE).ok_or(RequestError::MalformedUri)?;

    let (uri, query) = match next_token(target, &['?']) {
        Some((uri, after)) => (uri, next_token(after, WHITESPACE).map_or("", |(query, _)| query)),
        None => (target, ""),
    };

    Ok(RequestLine { method, uri, query })
}

/// Splits a chomped `Name: Value` line at the first `:`. Leading whitespace
/// is removed from the value; nothing else is, and the name may be empty.
pub fn split_header(line: &str) -> Result<(&str, &str), RequestError> {
    match line.split_once(':') {
        Some((name, value)) => Ok((name, skip_whitespace(value))),
        None => Err(RequestError::MalformedHeader {
            line: line.to_string(),
        }),
    }
}

/// Reads one bounded line, terminator included. `None` at end of stream or
/// when the request has no open stream.
async fn read_line<S>(request: &mut Request<S>) -> Result<Option<String>, RequestError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let Some(stream) = request.stream_mut() else {
        return Ok(None);
    };

    let mut buf = Vec::new();
    let n = (&mut *stream)
        .take(MAX_LINE_LEN as u64)
        .read_until(b'\n', &mut buf)
        .await
        .map_err(RequestError::Read)?;

    if n == 0 {
        return Ok(None);
    }

    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Reads the request line and fills in `method`, `uri` and `query`.
///
/// Fields are only written once the whole line has been accepted.
pub async fn parse_request_line<S>(request: &mut Request<S>) -> Result<(), RequestError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let line = read_line(request).await?.ok_or(RequestError::EmptyRequest)?;
    let RequestLine { method, uri, query } = split_request_line(&line)?;

    debug!("HTTP METHOD: {}", method);
    debug!("HTTP URI:    {}", uri);
    debug!("HTTP QUERY:  {}", query);

    request.method = Some(method.to_string());
    request.uri = Some(uri.to_string());
    request.query = Some(query.to_string());
    Ok(())
}

/// Reads header lines up to a blank line or end of stream.
///
/// Each header is pushed onto `request.headers` as soon as it is read, so a
/// malformed line leaves the earlier ones in place.
pub async fn parse_headers<S>(request: &mut Request<S>) -> Result<(), RequestError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    while let Some(line) = read_line(request).await? {
        let text = chomp(&line);
        if line.len() <= 2 || text.is_empty() {
            break;
        }

        let (name, value) = split_header(text)?;
        debug!("HTTP HEADER {} = {}", name, value);
        request.headers.push(name, value);
    }

    if request.headers.is_empty() {
        return Err(RequestError::NoHeaders);
    }

    Ok(())
}

impl<S> Request<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Parses the request line, then the header block.
    ///
    /// Stops at the first failure; headers are never read after a bad
    /// request line.
    pub async fn parse(&mut self) -> Result<(), RequestError> {
        if let Err(e) = parse_request_line(self).await {
            debug!("Can't parse request line: {}", e);
            return Err(e);
        }

        if let Err(e) = parse_headers(self).await {
            debug!("Can't parse request headers: {}", e);
            return Err(e);
        }

        Ok(())
    }
}
