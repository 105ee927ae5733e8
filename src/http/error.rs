use std::io;

use thiserror::Error;

/// Everything that can go wrong between accepting a connection and
/// handing a fully parsed request to a handler.
///
/// None of these are retried. Transport errors abandon the connection;
/// syntax errors abort the parse of the current request.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The listening socket failed to yield a client.
    #[error("unable to accept client: {0}")]
    Accept(#[source] io::Error),

    /// The peer address of an accepted socket could not be determined.
    #[error("failed to resolve peer address: {0}")]
    AddressResolution(#[source] io::Error),

    /// The accepted descriptor was unusable and could not be wrapped.
    #[error("unable to open socket stream: {0}")]
    StreamOpen(#[source] io::Error),

    /// Reading a line from the client failed.
    #[error("failed to read from client: {0}")]
    Read(#[source] io::Error),

    /// The stream ended before a request line arrived.
    #[error("empty request")]
    EmptyRequest,

    #[error("request line has no method")]
    MalformedMethod,

    #[error("request line has no uri")]
    MalformedUri,

    /// A header line without a `:` separator.
    #[error("malformed header line: {line:?}")]
    MalformedHeader { line: String },

    #[error("request has no headers")]
    NoHeaders,
}

impl RequestError {
    /// Returns `true` when the connection itself is unusable, i.e. there
    /// is nobody left to send an error response to.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            RequestError::Accept(_)
                | RequestError::AddressResolution(_)
                | RequestError::StreamOpen(_)
                | RequestError::Read(_)
                | RequestError::EmptyRequest
        )
    }
}
