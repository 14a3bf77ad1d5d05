//! TCP accept loop.
//!
//! Every accepted connection is served on its own handler thread, so a slow
//! or stalled client never blocks the accept loop or other clients.

use std::io;
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::thread;

use tracing::{error, info, warn};

use factmod_core::constants::exit_codes;
use factmod_core::error::FactError;

use crate::connection::serve_stream;

/// A bound worker server.
pub struct Server {
    listener: TcpListener,
    thread_count: usize,
}

impl Server {
    /// Bind the listening socket. `thread_count` is clamped to at least 1.
    ///
    /// # Errors
    ///
    /// Returns the I/O error from `bind`.
    pub fn bind<A: ToSocketAddrs>(addr: A, thread_count: usize) -> io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        Ok(Self {
            listener,
            thread_count: thread_count.max(1),
        })
    }

    /// Address the server is listening on.
    ///
    /// # Errors
    ///
    /// Returns the I/O error from the socket.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Threads used per request.
    #[must_use]
    pub fn thread_count(&self) -> usize {
        self.thread_count
    }

    /// Accept and serve connections until the process is terminated.
    ///
    /// Failed accepts are logged and skipped. A shard worker failure inside
    /// any connection terminates the process with `ERROR_THREAD`.
    ///
    /// # Errors
    ///
    /// `FactError::Thread` if a connection handler thread cannot be spawned.
    pub fn serve(&self) -> Result<(), FactError> {
        info!(
            addr = ?self.listener.local_addr().ok(),
            threads = self.thread_count,
            "server accepting connections"
        );

        for (id, incoming) in self.listener.incoming().enumerate() {
            let stream = match incoming {
                Ok(stream) => stream,
                Err(e) => {
                    warn!(error = %e, "could not establish new connection");
                    continue;
                }
            };
            self.spawn_handler(id, stream)?;
        }
        Ok(())
    }

    fn spawn_handler(&self, id: usize, stream: TcpStream) -> Result<(), FactError> {
        let thread_count = self.thread_count;
        thread::Builder::new()
            .name(format!("conn-{id}"))
            .spawn(move || handle_connection(stream, thread_count))
            .map(|_| ())
            .map_err(|e| FactError::Thread(format!("failed to spawn conn-{id}: {e}")))
    }
}

fn handle_connection(mut stream: TcpStream, thread_count: usize) {
    let peer = stream
        .peer_addr()
        .map_or_else(|_| "unknown".to_string(), |a| a.to_string());
    info!(peer = %peer, "connection accepted");

    match serve_stream(&mut stream, &peer, thread_count) {
        Ok(stats) => {
            info!(peer = %peer, requests = stats.requests, "connection closed");
        }
        Err(e) => {
            error!(peer = %peer, error = %e, "fatal worker failure, aborting server");
            std::process::exit(exit_codes::ERROR_THREAD);
        }
    }
    let _ = stream.shutdown(Shutdown::Both);
}
