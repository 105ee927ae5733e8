use std::mem;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufStream};
use tokio::net::TcpStream;
use tracing::debug;

use crate::http::header::Headers;

/// Ownership state of a client connection.
///
/// At most one representation is live at a time. Once the socket has been
/// wrapped in a [`BufStream`], closing the stream is what closes the socket.
#[derive(Debug)]
pub enum Connection<S> {
    /// Nothing to close: never attached, or already released.
    Closed,
    /// The accepted socket before it was wrapped.
    Raw(S),
    /// The socket behind a read/write buffer.
    Buffered(BufStream<S>),
}

/// A client request, from accept through release.
///
/// A `Request` exclusively owns its connection, its parsed strings and its
/// header list. The parse fields stay `None` until [`Request::parse`]
/// succeeds; after that `method`, `uri` and `query` are all set (`query`
/// may be empty). `path` is left for the handler.
#[derive(Debug)]
pub struct Request<S = TcpStream> {
    connection: Connection<S>,
    /// Numeric address of the peer.
    pub peer_host: String,
    /// Peer port as a decimal string.
    pub peer_port: String,
    pub method: Option<String>,
    /// Request target with any query string removed.
    pub uri: Option<String>,
    /// Filesystem path the handler resolved `uri` to, if it cares to.
    pub path: Option<String>,
    pub query: Option<String>,
    /// Parsed headers, most-recent-first.
    pub headers: Headers,
}

impl<S> Request<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// A request holding a freshly accepted, not yet buffered socket.
    pub(crate) fn with_raw(socket: S) -> Self {
        Self::with_connection(Connection::Raw(socket))
    }

    /// A request reading from an already connected stream.
    ///
    /// Used by transports other than the TCP acceptor, and by tests.
    pub fn from_stream(
        stream: S,
        peer_host: impl Into<String>,
        peer_port: impl Into<String>,
    ) -> Self {
        let mut request = Self::with_connection(Connection::Buffered(BufStream::new(stream)));
        request.peer_host = peer_host.into();
        request.peer_port = peer_port.into();
        request
    }

    fn with_connection(connection: Connection<S>) -> Self {
        Self {
            connection,
            peer_host: String::new(),
            peer_port: String::new(),
            method: None,
            uri: None,
            path: None,
            query: None,
            headers: Headers::new(),
        }
    }

    pub fn connection(&self) -> &Connection<S> {
        &self.connection
    }

    /// Moves the raw socket behind a buffered stream. Does nothing unless
    /// the connection is still raw.
    pub(crate) fn attach_stream(&mut self) {
        self.connection = match mem::replace(&mut self.connection, Connection::Closed) {
            Connection::Raw(socket) => Connection::Buffered(BufStream::new(socket)),
            other => other,
        };
    }

    /// The buffered stream, for reading the request and writing the reply.
    pub fn stream_mut(&mut self) -> Option<&mut BufStream<S>> {
        match &mut self.connection {
            Connection::Buffered(stream) => Some(stream),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.connection, Connection::Closed)
    }

    /// `true` once the request line has been parsed successfully.
    pub fn has_request_line(&self) -> bool {
        self.method.is_some() && self.uri.is_some()
    }

    /// Query string, empty when there was none or nothing was parsed yet.
    pub fn query(&self) -> &str {
        self.query.as_deref().unwrap_or("")
    }

    /// Shuts down whatever connection is live. Safe to call repeatedly.
    pub(crate) async fn close(&mut self) {
        let result = match mem::replace(&mut self.connection, Connection::Closed) {
            Connection::Buffered(mut stream) => stream.shutdown().await,
            Connection::Raw(mut socket) => socket.shutdown().await,
            Connection::Closed => return,
        };

        if let Err(e) = result {
            debug!("Error closing connection to {}:{}: {}", self.peer_host, self.peer_port, e);
        }
    }

    /// Tears the request down: closes the connection, then drops every
    /// parsed string and header.
    ///
    /// Works on a request in any state, including one whose acceptance
    /// failed halfway.
    pub async fn release(mut self) {
        self.close().await;

        self.method = None;
        self.uri = None;
        self.path = None;
        self.query = None;
        self.headers.clear();

        debug!("Released request from {}:{}", self.peer_host, self.peer_port);
    }
}
