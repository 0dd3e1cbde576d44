//! Pipeline plumbing: inter-stage latches, hazard detection, forwarding.

pub mod forwarding;
pub mod hazards;
pub mod latches;

pub use latches::{ExMem, IdEx, IfId, MemWb};
