use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use crate::http::error::RequestError;
use crate::http::request::Request;

/// Host and port strings for a peer address, both numeric.
pub fn peer_strings(addr: SocketAddr) -> (String, String) {
    (addr.ip().to_string(), addr.port().to_string())
}

/// Waits for the next client on `listener` and returns a request ready to
/// be parsed.
///
/// 1. Accepts the client socket.
/// 2. Records the peer host and port.
/// 3. Wraps the socket in a buffered stream.
///
/// On any failure after the accept, the partial request is released before
/// the error is returned.
pub async fn accept_request(listener: &TcpListener) -> Result<Request, RequestError> {
    let (socket, _) = listener.accept().await.map_err(RequestError::Accept)?;
    let peer = match socket.peer_addr() {
        Ok(addr) => addr,
        Err(e) => {
            Request::with_raw(socket).release().await;
            return Err(RequestError::AddressResolution(e));
        }
    };

    // A socket that already carries an error is not worth wrapping.
    let pending = match socket.take_error() {
        Ok(None) => None,
        Ok(Some(e)) | Err(e) => Some(e),
    };

    let mut request = Request::with_raw(socket);
    (request.peer_host, request.peer_port) = peer_strings(peer);

    if let Some(e) = pending {
        request.release().await;
        return Err(RequestError::StreamOpen(e));
    }
    request.attach_stream();

    info!("Accepted request from {}:{}", request.peer_host, request.peer_port);
    Ok(request)
}
