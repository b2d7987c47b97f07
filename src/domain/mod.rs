//! Core domain types and ports
//!
//! - [`model`]: pool, aggregate and job value types shared across the crate
//! - [`ports`]: trait boundaries toward the remote cluster

pub mod model;
pub mod ports;

pub use model::{
    AggregateInfo, AggregateMapping, JobId, JobPoll, JobState, PoolRecord, PoolSpec, SubmitOutcome,
};
pub use ports::{ClusterClient, ClusterClientRef, JobMonitor};
