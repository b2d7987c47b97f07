//! Capacity snapshots
//!
//! An immutable view of how many allocation units each node of a pool has
//! available, fetched fresh from the cluster before every mutating decision.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Per-node available allocation units for one storage pool
///
/// The node map preserves the order the cluster reported the nodes in; the
/// transfer planner relies on that order as its deterministic tie-break.
/// `total` is computed at construction, so `total == sum(nodes)` holds by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacitySnapshot {
    /// Pool the snapshot was taken from
    pub pool: String,
    /// Sum of all per-node availabilities
    pub total: u64,
    /// Available allocation units per node, in cluster-reported order
    pub nodes: IndexMap<String, u64>,
    /// When the snapshot was fetched
    pub taken_at: DateTime<Utc>,
}

impl CapacitySnapshot {
    /// Build a snapshot from per-node counts, computing the total
    pub fn from_node_counts<I, S>(pool: impl Into<String>, counts: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let nodes: IndexMap<String, u64> =
            counts.into_iter().map(|(n, c)| (n.into(), c)).collect();
        let total = nodes.values().sum();

        Self {
            pool: pool.into(),
            total,
            nodes,
            taken_at: Utc::now(),
        }
    }

    /// Units available on the given node; nodes the cluster did not report
    /// have zero available
    pub fn available_on(&self, node: &str) -> u64 {
        self.nodes.get(node).copied().unwrap_or(0)
    }

    /// True when no node has any unit available
    pub fn is_exhausted(&self) -> bool {
        self.total == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_sum_of_nodes() {
        let snapshot =
            CapacitySnapshot::from_node_counts("flashpool", [("node-01", 2u64), ("node-02", 3)]);
        assert_eq!(snapshot.total, 5);
        assert_eq!(snapshot.available_on("node-01"), 2);
        assert_eq!(snapshot.available_on("node-02"), 3);
    }

    #[test]
    fn test_unknown_node_has_zero_available() {
        let snapshot = CapacitySnapshot::from_node_counts("flashpool", [("node-01", 2u64)]);
        assert_eq!(snapshot.available_on("node-09"), 0);
    }

    #[test]
    fn test_exhausted() {
        let snapshot =
            CapacitySnapshot::from_node_counts("flashpool", [("node-01", 0u64), ("node-02", 0)]);
        assert!(snapshot.is_exhausted());
    }

    #[test]
    fn test_serialization_preserves_node_order() {
        let snapshot = CapacitySnapshot::from_node_counts(
            "flashpool",
            [("node-02", 1u64), ("node-01", 1), ("node-03", 1)],
        );
        let json = serde_json::to_string(&snapshot).unwrap();
        let node_02 = json.find("node-02").unwrap();
        let node_01 = json.find("node-01").unwrap();
        let node_03 = json.find("node-03").unwrap();
        assert!(node_02 < node_01 && node_01 < node_03);
    }
}
