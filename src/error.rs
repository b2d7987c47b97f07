//! Error types for the storage pool controller
//!
//! Provides structured error types for the capacity planner, the job
//! supervisor and the pool/mapping orchestration layer. Every variant is
//! terminal: nothing in this crate retries automatically, the reconciliation
//! driver only reports the originating message.

use crate::domain::model::JobId;
use thiserror::Error;

/// Unified error type for the controller
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Policy Violations
    // =========================================================================
    #[error("Invalid mutation for storage pool {pool}: {reason}")]
    InvalidMutation { pool: String, reason: String },

    // =========================================================================
    // Capacity Errors
    // =========================================================================
    #[error(
        "Not enough available capacity on storage pool {pool}: requested {requested} units, available {available} units"
    )]
    InsufficientCapacity {
        pool: String,
        requested: u64,
        available: u64,
    },

    // =========================================================================
    // Remote Cluster Errors
    // =========================================================================
    #[error("Cluster error during {operation}: {message}")]
    Remote { operation: String, message: String },

    #[error("Storage pool not found: {name}")]
    PoolNotFound { name: String },

    #[error("Cannot delete storage pool {name}: still referenced by an aggregate")]
    PoolInUse { name: String },

    #[error("Aggregate not found: {name}")]
    AggregateNotFound { name: String },

    // =========================================================================
    // Job Supervision Errors
    // =========================================================================
    #[error("Reassignment job {job_id} did not reach success within {ticks} polling ticks")]
    JobTimedOut { job_id: JobId, ticks: u64 },

    #[error("Job status query for {job_id} returned {records} records, expected at most one")]
    JobRecordConflict { job_id: JobId, records: u32 },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Shorthand for wrapping a remote/transport failure with the operation
    /// that was in flight. The remote message is preserved verbatim.
    pub fn remote(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Remote {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// True for grow-only policy violations (never a cluster-side problem)
    pub fn is_policy_violation(&self) -> bool {
        matches!(self, Error::InvalidMutation { .. })
    }

    /// True when the cluster simply does not have the requested units
    pub fn is_capacity_shortfall(&self) -> bool {
        matches!(self, Error::InsufficientCapacity { .. })
    }
}

/// Result type alias for the controller
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_preserves_message() {
        let err = Error::remote("storage-pool-reassign", "connection reset by peer");
        assert_eq!(
            err.to_string(),
            "Cluster error during storage-pool-reassign: connection reset by peer"
        );
    }

    #[test]
    fn test_error_classification() {
        let policy = Error::InvalidMutation {
            pool: "flashpool".into(),
            reason: "disk count cannot decrease".into(),
        };
        assert!(policy.is_policy_violation());
        assert!(!policy.is_capacity_shortfall());

        let shortfall = Error::InsufficientCapacity {
            pool: "flashpool".into(),
            requested: 4,
            available: 2,
        };
        assert!(shortfall.is_capacity_shortfall());
        assert!(!shortfall.is_policy_violation());
    }
}
