//! Pool mutation guard
//!
//! Storage pools only ever grow: the disk count may not decrease, and a disk
//! that is part of the pool may not be removed or swapped out. This module
//! validates a desired pool state against the observed one and reduces it to
//! the delta that may be committed.

use crate::domain::model::{PoolRecord, PoolSpec};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Validated grow-only delta between observed and desired pool state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthDecision {
    /// Add this many disks to the pool
    DiskCount { add: u64 },
    /// Add these specific disks to the pool
    Disks { add: Vec<String> },
    /// Desired state already matches the observed state
    Unchanged,
}

impl GrowthDecision {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, GrowthDecision::Unchanged)
    }
}

/// Validate a desired pool state against the observed one
///
/// Exactly one attribute family is validated per call; when both
/// `disk_count` and `disk_list` are present, `disk_count` takes precedence
/// and the list is ignored (known limitation, the combined semantics are
/// undefined upstream). Pure validation, no side effects; a rejection is
/// terminal for the whole apply operation.
pub fn validate_growth(current: &PoolRecord, desired: &PoolSpec) -> Result<GrowthDecision> {
    if let Some(disk_count) = desired.disk_count {
        if disk_count < current.disk_count {
            return Err(Error::InvalidMutation {
                pool: current.name.clone(),
                reason: format!(
                    "cannot decrease disk count from {} to {}",
                    current.disk_count, disk_count
                ),
            });
        }
        if disk_count == current.disk_count {
            return Ok(GrowthDecision::Unchanged);
        }
        return Ok(GrowthDecision::DiskCount {
            add: disk_count - current.disk_count,
        });
    }

    if let Some(disk_list) = &desired.disk_list {
        if disk_list.len() < current.disk_list.len() {
            return Err(Error::InvalidMutation {
                pool: current.name.clone(),
                reason: "cannot decrease the disk list".into(),
            });
        }
        // Removal is rejected even when the list as a whole grows: swapping
        // one disk for another while adding a third is not a valid mutation.
        if let Some(removed) = current
            .disk_list
            .iter()
            .find(|disk| !disk_list.contains(disk))
        {
            return Err(Error::InvalidMutation {
                pool: current.name.clone(),
                reason: format!("cannot remove disk {} from the existing disk list", removed),
            });
        }

        let add: Vec<String> = disk_list
            .iter()
            .filter(|disk| !current.disk_list.contains(disk))
            .cloned()
            .collect();
        if add.is_empty() {
            return Ok(GrowthDecision::Unchanged);
        }
        return Ok(GrowthDecision::Disks { add });
    }

    Ok(GrowthDecision::Unchanged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn current() -> PoolRecord {
        PoolRecord {
            name: "flashpool".into(),
            disk_count: 5,
            disk_list: vec!["1.0.0".into(), "1.0.1".into()],
            nodes: vec!["node-01".into(), "node-02".into()],
        }
    }

    fn desired() -> PoolSpec {
        PoolSpec::named("flashpool")
    }

    #[test]
    fn test_disk_count_decrease_rejected() {
        let mut spec = desired();
        spec.disk_count = Some(4);
        assert_matches!(
            validate_growth(&current(), &spec),
            Err(Error::InvalidMutation { .. })
        );
    }

    #[test]
    fn test_disk_count_growth_yields_delta() {
        let mut spec = desired();
        spec.disk_count = Some(8);
        assert_matches!(
            validate_growth(&current(), &spec),
            Ok(GrowthDecision::DiskCount { add: 3 })
        );
    }

    #[test]
    fn test_equal_disk_count_is_unchanged() {
        let mut spec = desired();
        spec.disk_count = Some(5);
        assert_matches!(
            validate_growth(&current(), &spec),
            Ok(GrowthDecision::Unchanged)
        );
    }

    #[test]
    fn test_disk_list_shrink_rejected() {
        let mut spec = desired();
        spec.disk_list = Some(vec!["1.0.0".into()]);
        assert_matches!(
            validate_growth(&current(), &spec),
            Err(Error::InvalidMutation { .. })
        );
    }

    #[test]
    fn test_disk_removal_rejected_even_when_list_grows() {
        // 1.0.1 is swapped out while two disks are added; still invalid.
        let mut spec = desired();
        spec.disk_list = Some(vec!["1.0.0".into(), "1.0.2".into(), "1.0.3".into()]);
        let err = validate_growth(&current(), &spec).unwrap_err();
        assert!(err.is_policy_violation());
        assert!(err.to_string().contains("1.0.1"));
    }

    #[test]
    fn test_disk_list_growth_yields_added_disks() {
        let mut spec = desired();
        spec.disk_list = Some(vec![
            "1.0.0".into(),
            "1.0.1".into(),
            "1.0.2".into(),
            "1.0.3".into(),
        ]);
        assert_matches!(
            validate_growth(&current(), &spec),
            Ok(GrowthDecision::Disks { add }) if add == vec!["1.0.2".to_string(), "1.0.3".to_string()]
        );
    }

    #[test]
    fn test_disk_count_takes_precedence_over_list() {
        // Both families supplied: only disk_count is validated per call.
        let mut spec = desired();
        spec.disk_count = Some(6);
        spec.disk_list = Some(vec!["1.0.9".into()]);
        assert_matches!(
            validate_growth(&current(), &spec),
            Ok(GrowthDecision::DiskCount { add: 1 })
        );
    }

    #[test]
    fn test_no_attributes_is_unchanged() {
        assert_matches!(
            validate_growth(&current(), &desired()),
            Ok(GrowthDecision::Unchanged)
        );
    }
}
