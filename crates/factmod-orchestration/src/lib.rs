//! # factmod-orchestration
//!
//! Roster parsing, shard dispatch across worker servers, and aggregation of
//! partial results into `k! mod m`.

pub mod interfaces;
pub mod orchestrator;
pub mod remote;
pub mod roster;

pub use interfaces::{DistributedResult, ResultPresenter, ShardError, ShardOutcome, ShardWorker};
pub use orchestrator::{cross_check, execute_distributed, execute_local, plan_shards};
pub use remote::TcpShardWorker;
pub use roster::{load_roster, parse_roster, ServerDescriptor};
