//! `ShardWorker` backed by a TCP worker server.

use std::io::{self, ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use tracing::debug;

use factmod_core::wire::{self, Task};

use crate::interfaces::{ShardError, ShardWorker};
use crate::roster::ServerDescriptor;

/// Sends one request per shard to a remote server.
///
/// `timeout` bounds the whole exchange (resolve excluded): every connect
/// attempt, the send and the receive share one deadline.
pub struct TcpShardWorker {
    server: ServerDescriptor,
    timeout: Duration,
}

impl TcpShardWorker {
    /// Create a worker for `server` with the given per-exchange timeout.
    #[must_use]
    pub fn new(server: ServerDescriptor, timeout: Duration) -> Self {
        Self { server, timeout }
    }

    fn resolve(&self) -> Result<Vec<SocketAddr>, ShardError> {
        let resolve_err = |reason: String| ShardError::Resolve {
            host: self.server.host.clone(),
            reason,
        };
        let addrs: Vec<SocketAddr> = (self.server.host.as_str(), self.server.port)
            .to_socket_addrs()
            .map_err(|e| resolve_err(e.to_string()))?
            .collect();
        if addrs.is_empty() {
            return Err(resolve_err("no addresses".to_string()));
        }
        Ok(addrs)
    }

    fn connect(&self, addrs: &[SocketAddr], deadline: Instant) -> Result<TcpStream, ShardError> {
        let mut last = None;
        for addr in addrs {
            let Some(remaining) = remaining(deadline) else {
                return Err(ShardError::Timeout(self.timeout));
            };
            match TcpStream::connect_timeout(addr, remaining) {
                Ok(stream) => return Ok(stream),
                Err(e) => {
                    debug!(server = %self.server, addr = %addr, error = %e, "connect attempt failed");
                    last = Some(e);
                }
            }
        }
        Err(match last {
            Some(e) if is_timeout(&e) => ShardError::Timeout(self.timeout),
            Some(e) => ShardError::Connect(e.to_string()),
            None => ShardError::Connect("no address to connect to".to_string()),
        })
    }

    fn classify(&self, e: &io::Error) -> ShardError {
        if is_timeout(e) {
            ShardError::Timeout(self.timeout)
        } else if e.kind() == ErrorKind::UnexpectedEof {
            ShardError::ShortRead
        } else {
            ShardError::Transport(e.to_string())
        }
    }
}

fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock)
}

/// Time left before `deadline`, `None` once it has passed.
fn remaining(deadline: Instant) -> Option<Duration> {
    Some(deadline.saturating_duration_since(Instant::now())).filter(|d| !d.is_zero())
}

/// Stream whose every read and write is bounded by a shared deadline.
struct DeadlineStream {
    stream: TcpStream,
    deadline: Instant,
}

impl DeadlineStream {
    fn budget(&self) -> io::Result<Duration> {
        remaining(self.deadline)
            .ok_or_else(|| io::Error::new(ErrorKind::TimedOut, "deadline exceeded"))
    }
}

impl Read for DeadlineStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let budget = self.budget()?;
        self.stream.set_read_timeout(Some(budget))?;
        self.stream.read(buf)
    }
}

impl Write for DeadlineStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let budget = self.budget()?;
        self.stream.set_write_timeout(Some(budget))?;
        self.stream.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}

impl ShardWorker for TcpShardWorker {
    fn compute(&self, task: &Task) -> Result<u64, ShardError> {
        let addrs = self.resolve()?;
        let deadline = Instant::now() + self.timeout;
        let mut stream = DeadlineStream {
            stream: self.connect(&addrs, deadline)?,
            deadline,
        };

        wire::write_task(&mut stream, task).map_err(|e| self.classify(&e))?;
        wire::read_response(&mut stream).map_err(|e| self.classify(&e))
    }

    fn name(&self) -> String {
        self.server.to_string()
    }
}
