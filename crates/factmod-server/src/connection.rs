//! Per-connection request loop.

use std::io::{Read, Write};

use tracing::{debug, info, warn};

use factmod_core::error::FactError;
use factmod_core::product::parallel_range_product;
use factmod_core::wire;

/// Counters for one served connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionStats {
    /// Requests answered on this connection.
    pub requests: u64,
}

/// Serve requests from `stream` until the peer closes it or sends a
/// malformed request.
///
/// Transport and framing errors end only this connection and are logged.
/// A worker thread failure is returned to the caller, which must treat it
/// as fatal.
///
/// # Errors
///
/// `FactError::Thread` if a shard worker could not be spawned or joined.
pub fn serve_stream<S: Read + Write>(
    stream: &mut S,
    peer: &str,
    thread_count: usize,
) -> Result<ConnectionStats, FactError> {
    let mut stats = ConnectionStats::default();

    loop {
        let task = match wire::read_task(stream) {
            Ok(Some(task)) => task,
            Ok(None) => {
                debug!(peer, "peer closed connection");
                break;
            }
            Err(e) => {
                warn!(peer, error = %e, "dropping connection");
                break;
            }
        };

        info!(
            peer,
            begin = task.range.begin,
            end = task.range.end,
            modulus = task.modulus,
            "received task"
        );

        let total = parallel_range_product(task.range, task.modulus, thread_count)?;
        debug!(peer, total, "task complete");

        if let Err(e) = wire::write_response(stream, total) {
            warn!(peer, error = %e, "failed to send response");
            break;
        }
        stats.requests += 1;
    }

    Ok(stats)
}
