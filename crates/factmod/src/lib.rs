//! factmod library: configuration and application logic behind the
//! `factmod-server` and `factmod-client` binaries.

pub mod app;
pub mod config;
pub mod errors;
pub mod version;
