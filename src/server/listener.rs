use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::config::{Config, ServerMode};
use crate::http::acceptor::accept_request;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::server::handler::Handler;

pub async fn run<H: Handler>(cfg: &Config, handler: H) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("Listening on {} ({} mode)", cfg.listen_addr, cfg.mode);

    serve(listener, cfg.mode, Arc::new(handler)).await;
    Ok(())
}

/// Accepts connections forever.
///
/// A failed accept only costs that connection; the listener stays up.
pub async fn serve<H: Handler>(listener: TcpListener, mode: ServerMode, handler: Arc<H>) {
    loop {
        let request = match accept_request(&listener).await {
            Ok(request) => request,
            Err(e) => {
                warn!("Dropping connection: {}", e);
                continue;
            }
        };

        match mode {
            ServerMode::Single => serve_connection(request, handler.as_ref()).await,
            ServerMode::Concurrent => {
                let handler = Arc::clone(&handler);
                tokio::spawn(async move {
                    serve_connection(request, handler.as_ref()).await;
                });
            }
        }
    }
}

/// Parses one request, hands it to `handler` and releases it.
///
/// A request with a syntax error gets a `400 Bad Request` instead, and a
/// failing handler a `500 Internal Server Error`, as long as the client is
/// still there to read it.
pub async fn serve_connection<H: Handler>(mut request: Request, handler: &H) {
    match request.parse().await {
        Ok(()) => {
            if let Err(e) = handler.handle(&mut request).await {
                error!("Handler error for {}:{}: {}", request.peer_host, request.peer_port, e);
                send_error(&mut request, Response::internal_error()).await;
            }
        }
        Err(e) => {
            warn!("Rejected request from {}:{}: {}", request.peer_host, request.peer_port, e);

            if !e.is_transport() {
                send_error(&mut request, Response::bad_request()).await;
            }
        }
    }

    request.release().await;
}

async fn send_error(request: &mut Request, response: Response) {
    let Some(stream) = request.stream_mut() else {
        return;
    };

    let mut writer = ResponseWriter::new(&response);
    if let Err(e) = writer.write_to(stream).await {
        debug!("Could not send {} response: {}", response.status.as_u16(), e);
    }
}
