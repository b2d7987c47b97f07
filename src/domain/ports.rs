//! Cluster ports - trait boundaries toward the remote storage cluster
//!
//! The controller is protocol-agnostic: every remote call goes through the
//! [`ClusterClient`] trait, injected by the embedding application. Calls are
//! at-most-once from this crate's perspective; a transport failure surfaces
//! immediately as [`Error::Remote`](crate::error::Error::Remote) and is never
//! retried here.

use crate::capacity::guard::GrowthDecision;
use crate::capacity::snapshot::CapacitySnapshot;
use crate::domain::model::{
    AggregateInfo, AggregateMapping, JobId, JobPoll, PoolRecord, PoolSpec, SubmitOutcome,
};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

// =============================================================================
// Job Monitor Port
// =============================================================================

/// Port for querying asynchronous cluster job status
///
/// Split out of [`ClusterClient`] so the job supervisor only depends on the
/// one call it needs.
#[async_trait]
pub trait JobMonitor: Send + Sync {
    /// Query the cluster's job queue for the given job id
    async fn poll_job(&self, job_id: JobId) -> Result<JobPoll>;
}

// =============================================================================
// Cluster Client Port
// =============================================================================

/// Port for all remote cluster operations the controller performs
#[async_trait]
pub trait ClusterClient: JobMonitor {
    /// Fetch a storage pool by name, `None` when it does not exist
    async fn get_pool(&self, name: &str) -> Result<Option<PoolRecord>>;

    /// Create a storage pool; may complete synchronously or queue a job
    async fn create_pool(&self, spec: &PoolSpec) -> Result<SubmitOutcome>;

    /// Delete a storage pool
    async fn delete_pool(&self, name: &str) -> Result<()>;

    /// Rename a storage pool
    async fn rename_pool(&self, from: &str, to: &str) -> Result<()>;

    /// Commit a validated grow-only mutation to a pool
    async fn commit_growth(&self, pool: &str, decision: &GrowthDecision) -> Result<()>;

    /// All aggregate mappings drawing capacity from the given pool
    async fn mappings_for_pool(&self, pool: &str) -> Result<Vec<AggregateMapping>>;

    /// The mapping owned by the given aggregate, `None` when it has none
    async fn get_mapping(&self, aggregate: &str) -> Result<Option<AggregateMapping>>;

    /// Ownership details of an aggregate, `None` when it does not exist
    async fn aggregate_info(&self, aggregate: &str) -> Result<Option<AggregateInfo>>;

    /// Set an option flag on an aggregate
    async fn set_aggregate_option(&self, aggregate: &str, name: &str, value: &str) -> Result<()>;

    /// Fetch the pool's per-node available allocation units
    ///
    /// Never cached by the controller: capacity can change between calls, so
    /// each mutating decision starts from a fresh snapshot.
    async fn query_capacity(&self, pool: &str) -> Result<CapacitySnapshot>;

    /// Submit a peer-to-peer allocation-unit transfer within a pool
    async fn submit_transfer(
        &self,
        pool: &str,
        from_node: &str,
        to_node: &str,
        units: u64,
    ) -> Result<SubmitOutcome>;

    /// Grant allocation units from a pool to an aggregate
    async fn grant_units(&self, pool: &str, aggregate: &str, units: u64) -> Result<SubmitOutcome>;
}

pub type ClusterClientRef = Arc<dyn ClusterClient>;
