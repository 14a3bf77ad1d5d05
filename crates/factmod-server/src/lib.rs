//! # factmod-server
//!
//! Worker server: accepts TCP connections and answers fixed-size range
//! product requests, splitting each request across local threads.

pub mod connection;
pub mod listener;

pub use connection::{serve_stream, ConnectionStats};
pub use listener::Server;
