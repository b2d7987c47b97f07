//! Transfer planner
//!
//! Computes the sequence of peer-to-peer allocation-unit transfers needed to
//! give one node of a pool enough local capacity. Each transfer becomes a
//! separate asynchronous cluster job with real latency and timeout cost, so
//! the planner prefers the fewest transfers: no transfer when the target
//! already has enough units, one transfer when a single donor can cover the
//! shortfall, and a greedy descending-availability spread otherwise.

use crate::capacity::snapshot::CapacitySnapshot;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One planned peer-to-peer transfer of allocation units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferInstruction {
    /// Donor node
    pub from_node: String,
    /// Node the capacity converges onto
    pub to_node: String,
    /// Units to move, always positive
    pub units: u64,
}

/// Plan the transfers required for `target_node` to hold `required_units`
///
/// Returns an empty plan when the target node already has enough units
/// available locally. The target node need not appear in the snapshot at
/// all; it is then treated as having zero units. Fails with
/// [`Error::InsufficientCapacity`] when the pool as a whole cannot satisfy
/// the request; no partial plan is attempted in that case.
///
/// Donors are consumed in descending order of availability. Ties keep the
/// snapshot's node order, so a plan is fully determined by its snapshot.
pub fn plan(
    snapshot: &CapacitySnapshot,
    target_node: &str,
    required_units: u64,
) -> Result<Vec<TransferInstruction>> {
    if required_units > snapshot.total {
        return Err(Error::InsufficientCapacity {
            pool: snapshot.pool.clone(),
            requested: required_units,
            available: snapshot.total,
        });
    }

    let local = snapshot.available_on(target_node);
    if local >= required_units {
        debug!(
            pool = %snapshot.pool,
            node = target_node,
            available = local,
            "node already has enough local capacity, nothing to transfer"
        );
        return Ok(Vec::new());
    }

    let deficit = required_units - local;
    let mut donors: Vec<(&str, u64)> = snapshot
        .nodes
        .iter()
        .filter(|(node, available)| node.as_str() != target_node && **available > 0)
        .map(|(node, available)| (node.as_str(), *available))
        .collect();
    // Stable sort: equal availabilities keep the snapshot's node order.
    donors.sort_by(|a, b| b.1.cmp(&a.1));

    // Single donor fast path: one job instead of several.
    if let Some(&(donor, available)) = donors.first() {
        if available >= deficit {
            return Ok(vec![TransferInstruction {
                from_node: donor.to_string(),
                to_node: target_node.to_string(),
                units: deficit,
            }]);
        }
    }

    let mut instructions = Vec::new();
    let mut remaining = deficit;
    for (donor, available) in donors {
        if remaining == 0 {
            break;
        }
        let units = remaining.min(available);
        instructions.push(TransferInstruction {
            from_node: donor.to_string(),
            to_node: target_node.to_string(),
            units,
        });
        remaining -= units;
    }

    // The total check above guarantees the donors cover the deficit; a
    // remainder here is a planner bug, not a runtime condition.
    debug_assert_eq!(remaining, 0, "plan does not cover the deficit");

    Ok(instructions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn snapshot(counts: &[(&str, u64)]) -> CapacitySnapshot {
        CapacitySnapshot::from_node_counts("flashpool", counts.iter().map(|&(n, c)| (n, c)))
    }

    fn planned_units(plan: &[TransferInstruction]) -> u64 {
        plan.iter().map(|i| i.units).sum()
    }

    #[test]
    fn test_local_capacity_short_circuits() {
        let snap = snapshot(&[("node-a", 3), ("node-b", 10)]);
        let plan = plan(&snap, "node-a", 3).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_insufficient_total_capacity() {
        let snap = snapshot(&[("node-a", 0), ("node-b", 0)]);
        assert_matches!(
            plan(&snap, "node-a", 1),
            Err(Error::InsufficientCapacity {
                requested: 1,
                available: 0,
                ..
            })
        );
    }

    #[test]
    fn test_single_donor_covers_deficit() {
        // node-a has 2 of the 3 required; node-b donates exactly 1.
        let snap = snapshot(&[("node-a", 2), ("node-b", 2)]);
        let plan = plan(&snap, "node-a", 3).unwrap();
        assert_eq!(
            plan,
            vec![TransferInstruction {
                from_node: "node-b".into(),
                to_node: "node-a".into(),
                units: 1,
            }]
        );
    }

    #[test]
    fn test_largest_donor_preferred() {
        let snap = snapshot(&[("node-a", 0), ("node-b", 2), ("node-c", 5)]);
        let plan = plan(&snap, "node-a", 4).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].from_node, "node-c");
        assert_eq!(plan[0].units, 4);
    }

    #[test]
    fn test_greedy_multi_donor_spread() {
        let snap = snapshot(&[("node-a", 1), ("node-b", 3), ("node-c", 2), ("node-d", 2)]);
        let instructions = plan(&snap, "node-a", 7).unwrap();
        assert_eq!(instructions.len(), 3);
        assert_eq!(instructions[0].from_node, "node-b");
        assert_eq!(instructions[0].units, 3);
        assert_eq!(planned_units(&instructions), 6);
    }

    #[test]
    fn test_plan_sums_to_deficit() {
        let snap = snapshot(&[("node-a", 2), ("node-b", 4), ("node-c", 3)]);
        let instructions = plan(&snap, "node-a", 9).unwrap();
        assert_eq!(planned_units(&instructions), 7);
    }

    #[test]
    fn test_never_transfers_from_target_or_zero_units() {
        let snap = snapshot(&[("node-a", 2), ("node-b", 0), ("node-c", 6)]);
        let instructions = plan(&snap, "node-a", 8).unwrap();
        for instruction in &instructions {
            assert_ne!(instruction.from_node, "node-a");
            assert!(instruction.units > 0);
        }
    }

    #[test]
    fn test_tie_break_keeps_snapshot_order() {
        let snap = snapshot(&[("node-c", 2), ("node-b", 2), ("node-d", 2)]);
        let instructions = plan(&snap, "node-a", 5).unwrap();
        let donors: Vec<&str> = instructions.iter().map(|i| i.from_node.as_str()).collect();
        assert_eq!(donors, vec!["node-c", "node-b", "node-d"]);
    }

    #[test]
    fn test_target_absent_from_snapshot() {
        let snap = snapshot(&[("node-b", 4)]);
        let instructions = plan(&snap, "node-a", 2).unwrap();
        assert_eq!(instructions.len(), 1);
        assert_eq!(instructions[0].to_node, "node-a");
        assert_eq!(instructions[0].units, 2);
    }
}
