//! Control plane orchestration
//!
//! Ties the mutation guard, the transfer planner and the job supervisor
//! together behind the entry points the reconciliation driver calls.

pub mod orchestrator;

pub use orchestrator::{MappingOutcome, MappingRequest, PoolOrchestrator};
