//! Spindle - minimal HTTP/1.x request ingestion
//!
//! Accepts client connections, parses the request line and headers, and
//! hands the result to a pluggable handler.

pub mod config;
pub mod http;
pub mod server;
