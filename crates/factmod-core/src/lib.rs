//! # factmod-core
//!
//! Core library for distributed `k! mod m`: overflow-free modular
//! multiplication, balanced range partitioning, threaded shard products and
//! the fixed-size wire codec spoken between client and servers.

pub mod constants;
pub mod error;
pub mod modular;
pub mod product;
pub mod range;
pub mod wire;

// Re-exports
pub use constants::{exit_codes, DEFAULT_SHARD_TIMEOUT, REQUEST_LEN, RESPONSE_LEN};
pub use error::FactError;
pub use modular::mul_mod;
pub use product::{factorial_mod, parallel_range_product, range_product};
pub use range::{partition, Range};
pub use wire::Task;
