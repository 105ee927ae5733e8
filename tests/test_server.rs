use std::net::SocketAddr;
use std::sync::Arc;

use spindle::config::ServerMode;
use spindle::server::listener::serve;
use spindle::http::request::Request;
use spindle::server::{EchoHandler, Handler};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

struct FailingHandler;

impl Handler for FailingHandler {
    async fn handle(&self, _request: &mut Request) -> anyhow::Result<()> {
        anyhow::bail!("backend unavailable")
    }
}

async fn start_with<H: Handler>(mode: ServerMode, handler: H) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve(listener, mode, Arc::new(handler)));
    addr
}

async fn start(mode: ServerMode) -> SocketAddr {
    start_with(mode, EchoHandler).await
}

async fn send(addr: SocketAddr, raw: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw.as_bytes()).await.unwrap();

    let mut out = Vec::new();
    stream.read_to_end(&mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn test_echo_response() {
    let addr = start(ServerMode::Single).await;
    let reply = send(
        addr,
        "GET /cgi.script?q=foo HTTP/1.0\r\nHost: localhost:8888\r\nAccept: text/html\r\n\r\n",
    )
    .await;

    assert!(reply.starts_with("HTTP/1.0 200 OK\r\n"));
    assert!(reply.contains("method: GET\n"));
    assert!(reply.contains("uri: /cgi.script\n"));
    assert!(reply.contains("query: q=foo\n"));

    let accept = reply.find("header: Accept: text/html").unwrap();
    let host = reply.find("header: Host: localhost:8888").unwrap();
    assert!(accept < host);
}

#[tokio::test]
async fn test_missing_headers_get_400() {
    let addr = start(ServerMode::Single).await;
    let reply = send(addr, "GET / HTTP/1.1\r\n\r\n").await;

    assert!(reply.starts_with("HTTP/1.0 400 Bad Request\r\n"));
}

#[tokio::test]
async fn test_malformed_header_gets_400() {
    let addr = start(ServerMode::Concurrent).await;
    let reply = send(addr, "GET / HTTP/1.1\r\nGarbageLine\r\n\r\n").await;

    assert!(reply.starts_with("HTTP/1.0 400 Bad Request\r\n"));
}

#[tokio::test]
async fn test_server_survives_bad_clients() {
    let addr = start(ServerMode::Single).await;

    drop(TcpStream::connect(addr).await.unwrap());
    let _ = send(addr, "\r\n").await;

    let reply = send(addr, "GET / HTTP/1.1\r\nHost: localhost\r\n\r\n").await;
    assert!(reply.starts_with("HTTP/1.0 200 OK\r\n"));
}

#[tokio::test]
async fn test_concurrent_mode_serves_overlapping_clients() {
    let addr = start(ServerMode::Concurrent).await;

    // Holds its connection open without sending anything.
    let idle = TcpStream::connect(addr).await.unwrap();

    let reply = send(addr, "GET /a HTTP/1.1\r\nHost: localhost\r\n\r\n").await;
    assert!(reply.contains("uri: /a\n"));

    drop(idle);
}

#[tokio::test]
async fn test_handler_error_gets_500() {
    let addr = start_with(ServerMode::Single, FailingHandler).await;
    let reply = send(addr, "GET / HTTP/1.1\r\nHost: localhost\r\n\r\n").await;

    assert!(reply.starts_with("HTTP/1.0 500 Internal Server Error\r\n"));
    assert!(reply.ends_with("500 Internal Server Error\n"));
}

#[tokio::test]
async fn test_handler_error_does_not_stop_server() {
    let addr = start_with(ServerMode::Concurrent, FailingHandler).await;

    for _ in 0..2 {
        let reply = send(addr, "GET / HTTP/1.1\r\nHost: localhost\r\n\r\n").await;
        assert!(reply.starts_with("HTTP/1.0 500 Internal Server Error\r\n"));
    }
}
