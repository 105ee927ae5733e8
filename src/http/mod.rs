//! HTTP request ingestion.
//!
//! Turns an accepted client connection into a parsed [`Request`] that a
//! handler can act on.
//!
//! # Architecture
//!
//! - **`acceptor`**: accepts a client and wraps its socket in a buffered stream
//! - **`parser`**: reads the request line and header block off the stream
//! - **`request`**: the request object, which owns the connection, and its teardown
//! - **`header`**: header entries in most-recent-first order
//! - **`error`**: the error kinds of every stage
//! - **`text`**: token and trim helpers used by the parser
//! - **`response`** / **`writer`**: minimal responses for the server shell
//!
//! # Request Lifecycle
//!
//! ```text
//!        ┌─────────────┐
//!        │  Accepted   │ ← peer recorded, stream attached
//!        └──────┬──────┘
//!               │ parse request line
//!               ▼
//!        ┌──────────────────┐
//!        │  Line parsed     │ ← method, uri, query set
//!        └──────┬───────────┘
//!               │ parse headers
//!               ▼
//!        ┌──────────────────┐
//!        │  Parsed          │ ← handed to the handler
//!        └──────┬───────────┘
//!               │
//!               ▼
//!           release        ← from any state, exactly once
//! ```
//!
//! # Example
//!
//! ```ignore
//! use spindle::http::acceptor::accept_request;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:9898").await?;
//!     let mut request = accept_request(&listener).await?;
//!     if request.parse().await.is_ok() {
//!         println!("{:?} {:?}", request.method, request.uri);
//!     }
//!     request.release().await;
//!     Ok(())
//! }
//! ```

pub mod acceptor;
pub mod error;
pub mod header;
pub mod parser;
pub mod request;
pub mod response;
pub mod text;
pub mod writer;

pub use error::RequestError;
pub use request::Request;
