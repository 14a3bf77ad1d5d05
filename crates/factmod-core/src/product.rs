//! Modular products over integer ranges: sequential, threaded and rayon.
//!
//! The threaded path gives every worker its own result slot (its join
//! handle) and folds the slots on the calling thread after the join
//! barrier, so no lock is needed to combine partial products.

use std::thread;

use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::debug;

use crate::error::FactError;
use crate::modular::mul_mod;
use crate::range::{partition, worker_count, Range};

/// Integers per rayon task in [`reference_factorial_mod`].
const REFERENCE_CHUNK: u64 = 1 << 14;

/// Product of every integer in `range`, reduced modulo `modulus`.
///
/// An empty range yields the identity `1 % modulus`.
///
/// # Panics
///
/// Panics if `modulus == 0`.
#[must_use]
pub fn range_product(range: Range, modulus: u64) -> u64 {
    let mut acc = 1 % modulus;
    if range.is_empty() {
        return acc;
    }
    for value in range.begin..=range.end {
        acc = mul_mod(acc, value, modulus);
        // zero is absorbing
        if acc == 0 {
            break;
        }
    }
    acc
}

/// Fold partial products in iteration order.
#[must_use]
pub fn fold_products<I>(values: I, modulus: u64) -> u64
where
    I: IntoIterator<Item = u64>,
{
    values
        .into_iter()
        .fold(1 % modulus, |acc, v| mul_mod(acc, v, modulus))
}

/// Product of `range` modulo `modulus`, split across `threads` OS threads.
///
/// Inverted bounds are swapped first. The worker count is clamped to the
/// number of integers in the range (at least one). Partial products are
/// folded in ascending shard order after every worker has been joined.
///
/// # Errors
///
/// `FactError::ZeroModulus` for `modulus == 0`, and `FactError::Thread` if a
/// worker cannot be spawned or panics.
pub fn parallel_range_product(
    range: Range,
    modulus: u64,
    threads: usize,
) -> Result<u64, FactError> {
    if modulus == 0 {
        return Err(FactError::ZeroModulus);
    }
    let range = range.normalized();
    let workers = worker_count(threads, range.len());
    let shards = partition(range, workers);

    let partials = thread::scope(|scope| -> Result<Vec<u64>, FactError> {
        let mut handles = Vec::with_capacity(shards.len());
        for (index, &shard) in shards.iter().enumerate() {
            debug!(index, begin = shard.begin, end = shard.end, modulus, "spawning shard worker");
            let handle = thread::Builder::new()
                .name(format!("shard-{index}"))
                .spawn_scoped(scope, move || range_product(shard, modulus))
                .map_err(|e| FactError::Thread(format!("failed to spawn shard-{index}: {e}")))?;
            handles.push(handle);
        }

        handles
            .into_iter()
            .enumerate()
            .map(|(index, handle)| {
                handle
                    .join()
                    .map_err(|_| FactError::Thread(format!("shard-{index} panicked")))
            })
            .collect()
    })?;

    Ok(fold_products(partials, modulus))
}

/// `k! mod modulus` computed locally on `threads` OS threads.
///
/// # Errors
///
/// Same as [`parallel_range_product`].
pub fn factorial_mod(k: u64, modulus: u64, threads: usize) -> Result<u64, FactError> {
    if modulus == 0 {
        return Err(FactError::ZeroModulus);
    }
    if k == 0 {
        return Ok(1 % modulus);
    }
    parallel_range_product(Range::new(1, k), modulus, threads)
}

/// `k! mod modulus` computed on the rayon pool.
///
/// Independent of the thread-per-shard path, for cross-checking results.
///
/// # Errors
///
/// `FactError::ZeroModulus` for `modulus == 0`.
pub fn reference_factorial_mod(k: u64, modulus: u64) -> Result<u64, FactError> {
    if modulus == 0 {
        return Err(FactError::ZeroModulus);
    }
    let chunks = k.div_ceil(REFERENCE_CHUNK);
    let product = (0..chunks)
        .into_par_iter()
        .map(|chunk| {
            let begin = chunk * REFERENCE_CHUNK + 1;
            let end = begin.saturating_add(REFERENCE_CHUNK - 1).min(k);
            range_product(Range::new(begin, end), modulus)
        })
        .reduce(|| 1 % modulus, |a, b| mul_mod(a, b, modulus));
    Ok(product)
}
