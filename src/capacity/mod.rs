//! Capacity model and planning
//!
//! - [`snapshot`]: per-node available allocation units for a pool
//! - [`guard`]: grow-only validation of pool mutations
//! - [`planner`]: minimal peer-to-peer transfer plans covering a shortfall

pub mod guard;
pub mod planner;
pub mod snapshot;

pub use guard::{validate_growth, GrowthDecision};
pub use planner::{plan, TransferInstruction};
pub use snapshot::CapacitySnapshot;
