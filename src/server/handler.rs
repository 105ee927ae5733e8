use std::future::Future;

use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// Acts on a fully parsed request.
///
/// The handler reads `method`, `uri`, `query` and `headers`, may set
/// `path`, and writes its response on [`Request::stream_mut`]. The caller
/// releases the request afterwards.
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, request: &mut Request) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Answers every request with a plain-text description of what was parsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoHandler;

impl EchoHandler {
    pub fn describe(request: &Request) -> String {
        let mut body = format!(
            "method: {}\nuri: {}\nquery: {}\n",
            request.method.as_deref().unwrap_or(""),
            request.uri.as_deref().unwrap_or(""),
            request.query(),
        );
        for header in &request.headers {
            body.push_str(&format!("header: {}: {}\n", header.name, header.value));
        }
        body
    }
}

impl Handler for EchoHandler {
    async fn handle(&self, request: &mut Request) -> anyhow::Result<()> {
        request.path = request.uri.clone();

        let response = Response::ok(Self::describe(request));
        let stream = request
            .stream_mut()
            .ok_or_else(|| anyhow::anyhow!("request has no open stream"))?;
        ResponseWriter::new(&response).write_to(stream).await
    }
}
