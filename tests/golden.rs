//! Golden file integration tests.
//!
//! Verifies the local, reference and distributed paths against known values
//! from tests/testdata/factorial_golden.json.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde::Deserialize;

use factmod_core::product::{factorial_mod, reference_factorial_mod};
use factmod_orchestration::interfaces::ShardWorker;
use factmod_orchestration::orchestrator::execute_distributed;
use factmod_orchestration::remote::TcpShardWorker;
use factmod_orchestration::roster::ServerDescriptor;
use factmod_server::Server;

#[derive(Deserialize)]
struct GoldenData {
    values: Vec<GoldenEntry>,
}

#[derive(Deserialize)]
struct GoldenEntry {
    k: u64,
    modulus: u64,
    value: u64,
}

fn load_golden() -> GoldenData {
    let data = std::fs::read_to_string("tests/testdata/factorial_golden.json")
        .or_else(|_| std::fs::read_to_string("../../tests/testdata/factorial_golden.json"))
        .expect("Failed to read golden file");
    serde_json::from_str(&data).expect("Failed to parse golden file")
}

fn start_server(threads: usize) -> u16 {
    let server = Server::bind("127.0.0.1:0", threads).unwrap();
    let port = server.local_addr().unwrap().port();
    thread::spawn(move || server.serve());
    port
}

#[test]
fn golden_file_is_not_empty() {
    assert!(load_golden().values.len() >= 10);
}

#[test]
fn golden_threaded_local() {
    for entry in load_golden().values {
        for threads in [1, 3, 8] {
            assert_eq!(
                factorial_mod(entry.k, entry.modulus, threads).unwrap(),
                entry.value,
                "{}! mod {} with {threads} threads",
                entry.k,
                entry.modulus
            );
        }
    }
}

#[test]
fn golden_rayon_reference() {
    for entry in load_golden().values {
        assert_eq!(
            reference_factorial_mod(entry.k, entry.modulus).unwrap(),
            entry.value,
            "{}! mod {}",
            entry.k,
            entry.modulus
        );
    }
}

#[test]
fn golden_distributed() {
    let workers: Vec<Arc<dyn ShardWorker>> = [2, 1, 4]
        .into_iter()
        .map(|threads| {
            let descriptor = ServerDescriptor::new("127.0.0.1", start_server(threads));
            Arc::new(TcpShardWorker::new(descriptor, Duration::from_secs(5))) as Arc<dyn ShardWorker>
        })
        .collect();

    for entry in load_golden().values {
        let result = execute_distributed(&workers, entry.k, entry.modulus).unwrap();
        assert!(!result.is_partial());
        assert_eq!(result.value, entry.value, "{}! mod {}", entry.k, entry.modulus);
    }
}
