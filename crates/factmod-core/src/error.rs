//! Error type shared by the factmod crates.

use crate::constants::{exit_codes, REQUEST_LEN};

/// Error type for factorial computation, transport framing and configuration.
#[derive(Debug, thiserror::Error)]
pub enum FactError {
    /// Configuration error (bad arguments, unusable roster).
    #[error("configuration error: {0}")]
    Config(String),

    /// A modulus of zero was supplied.
    #[error("modulus must be greater than zero")]
    ZeroModulus,

    /// A request frame did not have the fixed request size.
    #[error("malformed request: expected {expected} bytes, got {actual}")]
    Malformed {
        /// Bytes required for one frame.
        expected: usize,
        /// Bytes actually received.
        actual: usize,
    },

    /// A worker thread could not be spawned or joined.
    #[error("worker thread failure: {0}")]
    Thread(String),

    /// Every dispatched server failed.
    #[error("no results: all {attempted} servers failed or timed out")]
    NoResults {
        /// Number of servers that were sent work.
        attempted: usize,
    },

    /// The distributed result disagreed with a reference computation.
    #[error("result mismatch: distributed {distributed}, reference {reference}")]
    Mismatch {
        /// Value produced by the servers.
        distributed: u64,
        /// Value produced locally.
        reference: u64,
    },

    /// Underlying I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl FactError {
    /// Build a `Malformed` error for a request frame of `actual` bytes.
    #[must_use]
    pub fn short_request(actual: usize) -> Self {
        Self::Malformed {
            expected: REQUEST_LEN,
            actual,
        }
    }

    /// Process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::ZeroModulus => exit_codes::ERROR_CONFIG,
            Self::NoResults { .. } => exit_codes::ERROR_NO_RESULTS,
            Self::Mismatch { .. } => exit_codes::ERROR_MISMATCH,
            Self::Thread(_) => exit_codes::ERROR_THREAD,
            Self::Malformed { .. } | Self::Io(_) => exit_codes::ERROR_GENERIC,
        }
    }
}
