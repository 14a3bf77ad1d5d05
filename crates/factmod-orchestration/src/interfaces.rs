//! Orchestration interfaces.

use std::time::Duration;

use factmod_core::range::Range;
use factmod_core::wire::Task;

/// Something that can compute the modular product of one shard.
pub trait ShardWorker: Send + Sync {
    /// Compute the product of `task.range` modulo `task.modulus`.
    fn compute(&self, task: &Task) -> Result<u64, ShardError>;

    /// Human-readable worker name (typically `host:port`).
    fn name(&self) -> String;
}

/// Why a single shard failed. Never fatal to the whole run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShardError {
    /// Host name did not resolve.
    #[error("cannot resolve {host}: {reason}")]
    Resolve {
        /// Host as written in the roster.
        host: String,
        /// Resolver message.
        reason: String,
    },

    /// TCP connect failed.
    #[error("connection failed: {0}")]
    Connect(String),

    /// Connect, send or receive exceeded the timeout.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The peer closed before sending a full response.
    #[error("short read: connection closed before 8 response bytes")]
    ShortRead,

    /// Any other send/receive failure.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Result of one server's shard.
#[derive(Debug, Clone)]
pub struct ShardOutcome {
    /// Position of the server in the roster.
    pub index: usize,
    /// Worker name.
    pub server: String,
    /// Range assigned to this server.
    pub range: Range,
    /// Partial product, or why it is missing.
    pub outcome: Result<u64, ShardError>,
    /// `false` when the shard was empty and nothing was sent.
    pub dispatched: bool,
    /// Wall-clock time spent on this shard.
    pub duration: Duration,
}

impl ShardOutcome {
    /// `true` if the shard contributed to the result.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Aggregated answer for `k! mod modulus`.
#[derive(Debug, Clone)]
pub struct DistributedResult {
    /// Factorial argument.
    pub k: u64,
    /// Modulus.
    pub modulus: u64,
    /// Product of every successful shard.
    pub value: u64,
    /// Servers whose shard is covered.
    pub succeeded: usize,
    /// Servers in the roster.
    pub total: usize,
    /// Per-server outcomes in roster order.
    pub shards: Vec<ShardOutcome>,
    /// Wall-clock time for the whole run.
    pub duration: Duration,
}

impl DistributedResult {
    /// `true` when some shards are missing and `value` is not `k! mod m`.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.succeeded < self.total
    }
}

/// Trait for presenting results to the user.
pub trait ResultPresenter: Send + Sync {
    /// Present the shard assignment before dispatch.
    fn present_plan(&self, servers: &[String], shards: &[Range]);

    /// Present the aggregated result.
    fn present_result(&self, result: &DistributedResult);

    /// Present an error.
    fn present_error(&self, error: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(index: usize, outcome: Result<u64, ShardError>) -> ShardOutcome {
        ShardOutcome {
            index,
            server: format!("host:{index}"),
            range: Range::new(1, 2),
            outcome,
            dispatched: true,
            duration: Duration::from_millis(1),
        }
    }

    #[test]
    fn partial_flag() {
        let full = DistributedResult {
            k: 4,
            modulus: 100,
            value: 24,
            succeeded: 2,
            total: 2,
            shards: vec![outcome(0, Ok(2)), outcome(1, Ok(12))],
            duration: Duration::ZERO,
        };
        assert!(!full.is_partial());

        let partial = DistributedResult {
            succeeded: 1,
            shards: vec![outcome(0, Ok(2)), outcome(1, Err(ShardError::ShortRead))],
            ..full
        };
        assert!(partial.is_partial());
        assert!(!partial.shards[1].succeeded());
    }

    #[test]
    fn shard_error_display() {
        assert_eq!(
            ShardError::Timeout(Duration::from_secs(5)).to_string(),
            "timed out after 5s"
        );
        assert_eq!(
            ShardError::Resolve {
                host: "nowhere".into(),
                reason: "not found".into()
            }
            .to_string(),
            "cannot resolve nowhere: not found"
        );
    }
}
