//! Pool orchestrator
//!
//! Entry points for the reconciliation driver:
//! - Pool lifecycle: create, delete, rename, grow-only expansion
//! - Operator-driven unit reassignment between nodes
//! - Aggregate mapping creation and growth, with capacity rebalancing
//!
//! Every operation runs to completion before the next begins; the only
//! suspension point is the job-poll wait inside the supervisor. On any
//! failure the remaining work is abandoned with the originating message
//! intact. Transfers that already completed are not rolled back.

use crate::capacity::guard::{validate_growth, GrowthDecision};
use crate::capacity::planner;
use crate::config::ControllerConfig;
use crate::domain::model::{AggregateInfo, PoolSpec, SubmitOutcome};
use crate::domain::ports::{ClusterClient, ClusterClientRef};
use crate::error::{Error, Result};
use crate::jobs::clock::ClockRef;
use crate::jobs::supervisor::JobSupervisor;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// =============================================================================
// Mapping Request / Outcome
// =============================================================================

/// Desired pool-to-aggregate mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRequest {
    /// Aggregate drawing the capacity
    pub aggregate: String,
    /// Pool providing the capacity
    pub pool: String,
    /// Total units the aggregate should hold, monotonically non-decreasing
    pub allocation_units: u64,
}

/// What `ensure_mapping` did, for the driver's changed reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MappingOutcome {
    /// First units granted to this aggregate
    Created,
    /// Existing mapping grew by this many units
    Grew(u64),
    /// Mapping already at the requested size
    Unchanged,
}

// =============================================================================
// Pool Orchestrator
// =============================================================================

/// Coordinates pool and mapping mutations against the remote cluster
pub struct PoolOrchestrator {
    client: ClusterClientRef,
    clock: ClockRef,
    config: ControllerConfig,
}

impl PoolOrchestrator {
    pub fn new(client: ClusterClientRef, clock: ClockRef, config: ControllerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            client,
            clock,
            config,
        })
    }

    fn supervisor(&self) -> JobSupervisor<'_, dyn ClusterClient> {
        JobSupervisor::new(&*self.client, &*self.clock)
            .with_poll_interval(self.config.poll_interval)
    }

    /// Supervise the submitted call when the cluster queued it as a job
    async fn await_outcome(&self, outcome: SubmitOutcome, timeout_ticks: u64) -> Result<()> {
        match outcome {
            SubmitOutcome::Completed => Ok(()),
            SubmitOutcome::InProgress(job_id) => {
                self.supervisor().await_job(job_id, timeout_ticks).await
            }
        }
    }

    // =========================================================================
    // Pool Lifecycle
    // =========================================================================

    /// Create a storage pool, supervising the creation job when asynchronous
    pub async fn create_pool(&self, spec: &PoolSpec) -> Result<()> {
        info!(pool = %spec.name, "creating storage pool");
        let outcome = self.client.create_pool(spec).await?;
        self.await_outcome(outcome, self.config.reassign_timeout_ticks)
            .await
    }

    /// Delete a storage pool, refusing while any aggregate still draws from it
    pub async fn delete_pool(&self, name: &str) -> Result<()> {
        let mappings = self.client.mappings_for_pool(name).await?;
        if !mappings.is_empty() {
            return Err(Error::PoolInUse { name: name.into() });
        }

        info!(pool = name, "deleting storage pool");
        self.client.delete_pool(name).await
    }

    /// Rename a storage pool; the source pool must exist
    pub async fn rename_pool(&self, from: &str, to: &str) -> Result<()> {
        if self.client.get_pool(from).await?.is_none() {
            return Err(Error::PoolNotFound { name: from.into() });
        }

        info!(from, to, "renaming storage pool");
        self.client.rename_pool(from, to).await
    }

    /// Grow a pool toward its desired state
    ///
    /// Validates the delta through the mutation guard and commits it; an
    /// `Unchanged` decision commits nothing. The decision is returned so the
    /// driver can report whether anything changed.
    pub async fn expand_pool(&self, desired: &PoolSpec) -> Result<GrowthDecision> {
        let current = self
            .client
            .get_pool(&desired.name)
            .await?
            .ok_or_else(|| Error::PoolNotFound {
                name: desired.name.clone(),
            })?;

        let decision = validate_growth(&current, desired)?;
        if !decision.is_unchanged() {
            info!(pool = %desired.name, ?decision, "growing storage pool");
            self.client.commit_growth(&desired.name, &decision).await?;
        }
        Ok(decision)
    }

    /// Operator-driven transfer of allocation units between two nodes
    pub async fn reassign_units(
        &self,
        pool: &str,
        from_node: &str,
        to_node: &str,
        units: u64,
    ) -> Result<()> {
        if self.client.get_pool(pool).await?.is_none() {
            return Err(Error::PoolNotFound { name: pool.into() });
        }

        info!(pool, from_node, to_node, units, "reassigning allocation units");
        let outcome = self
            .client
            .submit_transfer(pool, from_node, to_node, units)
            .await?;
        self.await_outcome(outcome, self.config.reassign_timeout_ticks)
            .await
    }

    // =========================================================================
    // Aggregate Mappings
    // =========================================================================

    /// Converge a pool-to-aggregate mapping onto the requested unit count
    ///
    /// Creates the mapping when the aggregate has none, enabling the
    /// aggregate's hybrid option first when needed; grows an existing
    /// mapping by the delta. Shrinking is rejected.
    pub async fn ensure_mapping(&self, request: &MappingRequest) -> Result<MappingOutcome> {
        let current = self.client.get_mapping(&request.aggregate).await?;

        match current {
            None => {
                let aggregate = self.lookup_aggregate(&request.aggregate).await?;
                if !aggregate.hybrid_enabled {
                    info!(aggregate = %aggregate.name, "enabling hybrid option");
                    self.client
                        .set_aggregate_option(&aggregate.name, "hybrid_enabled", "true")
                        .await?;
                }

                self.grow_allocation(&request.pool, &aggregate, request.allocation_units)
                    .await?;
                Ok(MappingOutcome::Created)
            }
            Some(mapping) => {
                if request.allocation_units == mapping.allocation_units {
                    return Ok(MappingOutcome::Unchanged);
                }
                if request.allocation_units < mapping.allocation_units {
                    return Err(Error::InvalidMutation {
                        pool: request.pool.clone(),
                        reason: format!(
                            "allocation units cannot be reduced for aggregate {}",
                            request.aggregate
                        ),
                    });
                }

                let delta = request.allocation_units - mapping.allocation_units;
                let aggregate = self.lookup_aggregate(&request.aggregate).await?;
                self.grow_allocation(&request.pool, &aggregate, delta)
                    .await?;
                Ok(MappingOutcome::Grew(delta))
            }
        }
    }

    async fn lookup_aggregate(&self, name: &str) -> Result<AggregateInfo> {
        self.client
            .aggregate_info(name)
            .await?
            .ok_or_else(|| Error::AggregateNotFound { name: name.into() })
    }

    /// Rebalance capacity onto the aggregate's node, then grant the units
    async fn grow_allocation(
        &self,
        pool: &str,
        aggregate: &AggregateInfo,
        units: u64,
    ) -> Result<()> {
        self.rebalance_capacity(pool, &aggregate.node, units).await?;

        info!(pool, aggregate = %aggregate.name, units, "granting allocation units");
        let outcome = self.client.grant_units(pool, &aggregate.name, units).await?;
        self.await_outcome(outcome, self.config.mapping_timeout_ticks)
            .await
    }

    /// Move units from peer nodes until `target_node` holds `wanted_units`
    ///
    /// Takes a fresh snapshot, plans the transfers and executes them in
    /// order, each supervised to completion before the next is submitted.
    /// The first failure abandons the remaining plan.
    async fn rebalance_capacity(
        &self,
        pool: &str,
        target_node: &str,
        wanted_units: u64,
    ) -> Result<()> {
        let snapshot = self.client.query_capacity(pool).await?;
        let instructions = planner::plan(&snapshot, target_node, wanted_units)?;

        let planned = instructions.len();
        for (index, instruction) in instructions.iter().enumerate() {
            info!(
                pool,
                from = %instruction.from_node,
                to = %instruction.to_node,
                units = instruction.units,
                "executing planned transfer"
            );
            let result = async {
                let outcome = self
                    .client
                    .submit_transfer(
                        pool,
                        &instruction.from_node,
                        &instruction.to_node,
                        instruction.units,
                    )
                    .await?;
                self.await_outcome(outcome, self.config.mapping_timeout_ticks)
                    .await
            }
            .await;

            if let Err(err) = result {
                warn!(
                    pool,
                    completed = index,
                    planned,
                    "transfer failed, abandoning remaining plan"
                );
                return Err(err);
            }
        }

        Ok(())
    }
}
