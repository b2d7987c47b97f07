//! Asynchronous job supervision
//!
//! - [`clock`]: injectable sleep abstraction so tests advance time instantly
//! - [`supervisor`]: poll-to-completion state machine with bounded timeout

pub mod clock;
pub mod supervisor;

pub use clock::{Clock, ClockRef, TokioClock};
pub use supervisor::JobSupervisor;
