//! Core orchestration: shard planning, concurrent dispatch and aggregation.

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use tracing::{debug, info, warn};

use factmod_core::error::FactError;
use factmod_core::modular::mul_mod;
use factmod_core::product::factorial_mod;
use factmod_core::range::{partition, Range};
use factmod_core::wire::Task;

use crate::interfaces::{DistributedResult, ShardOutcome, ShardWorker};

/// Split `[1, k]` into one shard per server.
#[must_use]
pub fn plan_shards(k: u64, servers: usize) -> Vec<Range> {
    partition(Range::new(1, k), servers)
}

/// Compute `k! mod modulus` across `workers`, one thread per worker.
///
/// Every dispatched thread is joined before aggregation; there is no early
/// exit on the first failure. Failed shards are left out of the product and
/// counted, so a partial answer is still returned with
/// [`DistributedResult::is_partial`] set. Empty shards (when `k` is smaller
/// than the number of workers) are never sent over the wire.
///
/// # Errors
///
/// `FactError::ZeroModulus` for `modulus == 0`, `FactError::Config` for an
/// empty worker list, `FactError::Thread` if a dispatch thread cannot be
/// spawned or joined, and `FactError::NoResults` if every dispatched server
/// failed.
pub fn execute_distributed(
    workers: &[Arc<dyn ShardWorker>],
    k: u64,
    modulus: u64,
) -> Result<DistributedResult, FactError> {
    if modulus == 0 {
        return Err(FactError::ZeroModulus);
    }
    if workers.is_empty() {
        return Err(FactError::Config("no servers to dispatch to".into()));
    }

    let start = Instant::now();
    let shards = plan_shards(k, workers.len());
    info!(k, modulus, servers = workers.len(), "dispatching shards");

    let outcomes = thread::scope(|scope| -> Result<Vec<ShardOutcome>, FactError> {
        let mut handles = Vec::with_capacity(workers.len());
        for (index, (worker, &range)) in workers.iter().zip(&shards).enumerate() {
            let handle = thread::Builder::new()
                .name(format!("dispatch-{index}"))
                .spawn_scoped(scope, move || run_shard(index, worker.as_ref(), range, modulus))
                .map_err(|e| {
                    FactError::Thread(format!("failed to spawn dispatch-{index}: {e}"))
                })?;
            handles.push(handle);
        }

        handles
            .into_iter()
            .enumerate()
            .map(|(index, handle)| {
                handle
                    .join()
                    .map_err(|_| FactError::Thread(format!("dispatch-{index} panicked")))
            })
            .collect()
    })?;

    aggregate(k, modulus, outcomes, start)
}

fn run_shard(index: usize, worker: &dyn ShardWorker, range: Range, modulus: u64) -> ShardOutcome {
    let server = worker.name();
    let start = Instant::now();

    if range.is_empty() {
        debug!(index, server = %server, "empty shard, nothing to send");
        return ShardOutcome {
            index,
            server,
            range,
            outcome: Ok(1 % modulus),
            dispatched: false,
            duration: start.elapsed(),
        };
    }

    debug!(index, server = %server, begin = range.begin, end = range.end, "sending shard");
    let outcome = worker.compute(&Task::new(range, modulus));
    match &outcome {
        Ok(value) => info!(server = %server, value, %range, "server returned"),
        Err(e) => warn!(server = %server, error = %e, "server failed or timed out"),
    }

    ShardOutcome {
        index,
        server,
        range,
        outcome,
        dispatched: true,
        duration: start.elapsed(),
    }
}

fn aggregate(
    k: u64,
    modulus: u64,
    shards: Vec<ShardOutcome>,
    start: Instant,
) -> Result<DistributedResult, FactError> {
    let total = shards.len();
    let mut value = 1 % modulus;
    let mut succeeded = 0;
    for shard in &shards {
        if let Ok(partial) = shard.outcome {
            value = mul_mod(value, partial, modulus);
            succeeded += 1;
        }
    }

    let failed = total - succeeded;
    if failed > 0 {
        let attempted = shards.iter().filter(|s| s.dispatched).count();
        if failed == attempted {
            warn!(attempted, "all servers failed");
            return Err(FactError::NoResults { attempted });
        }
        warn!(failed, total, "computing with available results");
    }

    Ok(DistributedResult {
        k,
        modulus,
        value,
        succeeded,
        total,
        shards,
        duration: start.elapsed(),
    })
}

/// Compare a distributed result with a locally computed reference.
///
/// Partial results are not comparable and always pass.
///
/// # Errors
///
/// `FactError::Mismatch` if a full-coverage result differs from `reference`.
pub fn cross_check(result: &DistributedResult, reference: u64) -> Result<(), FactError> {
    if result.is_partial() || result.value == reference {
        return Ok(());
    }
    Err(FactError::Mismatch {
        distributed: result.value,
        reference,
    })
}

/// Compute `k! mod modulus` in this process on `threads` OS threads.
///
/// The result has a single shard named `local` covering `[1, k]`, so it
/// goes through the same presentation and [`cross_check`] as a distributed
/// run.
///
/// # Errors
///
/// `FactError::ZeroModulus` for `modulus == 0`, `FactError::Thread` if a
/// worker thread cannot be spawned or joined.
pub fn execute_local(k: u64, modulus: u64, threads: usize) -> Result<DistributedResult, FactError> {
    let start = Instant::now();
    info!(k, modulus, threads, "computing locally");
    let value = factorial_mod(k, modulus, threads)?;
    let duration = start.elapsed();
    let range = Range::new(1, k);

    Ok(DistributedResult {
        k,
        modulus,
        value,
        succeeded: 1,
        total: 1,
        shards: vec![ShardOutcome {
            index: 0,
            server: "local".to_string(),
            range,
            outcome: Ok(value),
            dispatched: !range.is_empty(),
            duration,
        }],
        duration,
    })
}
