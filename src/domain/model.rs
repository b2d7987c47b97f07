//! Pool, aggregate and job value types
//!
//! These mirror what the cluster reports, not what the reconciliation driver
//! desires; the only desired-state type is [`PoolSpec`].

use serde::{Deserialize, Serialize};

// =============================================================================
// Storage Pools
// =============================================================================

/// Observed state of a storage pool, as reported by the cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRecord {
    /// Pool name, unique within the cluster
    pub name: String,
    /// Number of physical disks backing the pool
    pub disk_count: u64,
    /// Identifiers of the backing disks
    pub disk_list: Vec<String>,
    /// Nodes owning the pool's disks
    pub nodes: Vec<String>,
}

/// Desired state of a storage pool
///
/// `disk_count` and `disk_list` are alternative ways of sizing the pool; the
/// mutation guard validates whichever one is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSpec {
    pub name: String,
    pub disk_count: Option<u64>,
    pub disk_list: Option<Vec<String>>,
    pub nodes: Option<Vec<String>>,
}

impl PoolSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

// =============================================================================
// Aggregates
// =============================================================================

/// Ownership details of an aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateInfo {
    /// Aggregate name
    pub name: String,
    /// Node owning the aggregate; transfers converge capacity onto this node
    pub node: String,
    /// Whether the aggregate may draw allocation units from a pool
    pub hybrid_enabled: bool,
}

/// Mapping between an aggregate and the pool it draws capacity from
///
/// `allocation_units` only ever grows over the mapping's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateMapping {
    pub aggregate: String,
    pub pool: String,
    pub allocation_units: u64,
}

// =============================================================================
// Asynchronous Jobs
// =============================================================================

/// Cluster-assigned job identifier, opaque to this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub u64);

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Job state as reported verbatim by the cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Success,
    Queued,
    Running,
    Failure,
    /// Any state string this crate does not know about
    Other(String),
}

impl JobState {
    /// Parse the cluster's job-state string; unknown strings are kept verbatim
    pub fn parse(state: &str) -> Self {
        match state {
            "success" => JobState::Success,
            "queued" => JobState::Queued,
            "running" => JobState::Running,
            "failure" => JobState::Failure,
            other => JobState::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobState::Success => write!(f, "success"),
            JobState::Queued => write!(f, "queued"),
            JobState::Running => write!(f, "running"),
            JobState::Failure => write!(f, "failure"),
            JobState::Other(s) => write!(f, "{}", s),
        }
    }
}

/// One job-status query result
///
/// `records` is the number of matching job records on the cluster. Zero
/// records means the job was purged from the queue, which by cluster
/// convention means it completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPoll {
    pub records: u32,
    pub state: Option<JobState>,
}

impl JobPoll {
    /// The job is gone from the queue
    pub fn absent() -> Self {
        Self {
            records: 0,
            state: None,
        }
    }

    /// Exactly one record, reporting the given state
    pub fn reported(state: JobState) -> Self {
        Self {
            records: 1,
            state: Some(state),
        }
    }
}

/// Outcome of submitting a mutating call to the cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitOutcome {
    /// The cluster applied the change synchronously
    Completed,
    /// The cluster queued an asynchronous job; supervise it to completion
    InProgress(JobId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_state_parse() {
        assert_eq!(JobState::parse("success"), JobState::Success);
        assert_eq!(JobState::parse("running"), JobState::Running);
        assert_eq!(
            JobState::parse("reverting"),
            JobState::Other("reverting".into())
        );
    }

    #[test]
    fn test_job_state_display_round_trip() {
        for state in ["success", "queued", "running", "failure", "paused"] {
            assert_eq!(JobState::parse(state).to_string(), state);
        }
    }
}
