//! Wire sizes, timeouts and exit codes shared by the server and the client.

use std::time::Duration;

/// Size in bytes of one encoded request: `begin`, `end`, `modulus`.
pub const REQUEST_LEN: usize = 3 * WORD_LEN;

/// Size in bytes of one encoded response.
pub const RESPONSE_LEN: usize = WORD_LEN;

/// Size in bytes of one wire integer.
pub const WORD_LEN: usize = std::mem::size_of::<u64>();

/// Default per-server connect/send/receive timeout on the client.
pub const DEFAULT_SHARD_TIMEOUT: Duration = Duration::from_secs(5);

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution (including best-effort partial results).
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Missing or invalid command-line arguments (clap's own code).
    pub const ERROR_USAGE: i32 = 2;
    /// Distributed result disagreed with the local reference.
    pub const ERROR_MISMATCH: i32 = 3;
    /// Invalid configuration (unreadable or empty roster, zero modulus).
    pub const ERROR_CONFIG: i32 = 4;
    /// No server produced a result.
    pub const ERROR_NO_RESULTS: i32 = 5;
    /// A worker thread could not be spawned or joined.
    pub const ERROR_THREAD: i32 = 6;
    /// Interrupted by Ctrl+C.
    pub const ERROR_CANCELED: i32 = 130;
}
