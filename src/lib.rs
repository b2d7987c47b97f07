//! Storage Pool Controller
//!
//! Capacity-management core for a networked storage cluster: storage-pool
//! lifecycle, pool-to-aggregate allocation-unit mappings, and the
//! capacity-reassignment planner plus asynchronous-job supervisor that move
//! allocation units between nodes.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                  Reconciliation Driver (external)                 │
//! │            fetch state · diff · converge · report changed         │
//! └───────────────────────────────┬──────────────────────────────────┘
//!                                 │
//! ┌───────────────────────────────┴──────────────────────────────────┐
//! │                        Pool Orchestrator                          │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌────────────────┐  │
//! │  │  Mutation Guard  │  │ Transfer Planner │  │ Job Supervisor │  │
//! │  │   (grow-only)    │  │ (greedy, minimal │  │ (poll + tick   │  │
//! │  │                  │  │   transfers)     │  │   timeout)     │  │
//! │  └──────────────────┘  └──────────────────┘  └────────────────┘  │
//! └───────────────────────────────┬──────────────────────────────────┘
//!                                 │
//! ┌───────────────────────────────┴──────────────────────────────────┐
//! │                 ClusterClient (injected port)                     │
//! │   capacity query · transfer submit · job poll · pool mutations    │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`controlplane`]: pool and mapping orchestration entry points
//! - [`capacity`]: capacity snapshots, mutation guard, transfer planner
//! - [`jobs`]: asynchronous job supervision and the clock abstraction
//! - [`domain`]: value types and the cluster-facing traits
//! - [`config`]: orchestrator configuration
//! - [`error`]: error types and handling

pub mod capacity;
pub mod config;
pub mod controlplane;
pub mod domain;
pub mod error;
pub mod jobs;

// Re-export commonly used types
pub use capacity::{
    guard::{validate_growth, GrowthDecision},
    planner::{plan, TransferInstruction},
    snapshot::CapacitySnapshot,
};

pub use config::ControllerConfig;

pub use controlplane::{MappingOutcome, MappingRequest, PoolOrchestrator};

pub use domain::{
    AggregateInfo, AggregateMapping, ClusterClient, ClusterClientRef, JobId, JobMonitor, JobPoll,
    JobState, PoolRecord, PoolSpec, SubmitOutcome,
};

pub use error::{Error, Result};

pub use jobs::{Clock, ClockRef, JobSupervisor, TokioClock};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
