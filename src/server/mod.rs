//! Server shell around the request core: the accept loop and the handler
//! interface parsed requests are handed to.

pub mod handler;
pub mod listener;

pub use handler::{EchoHandler, Handler};
