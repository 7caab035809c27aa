//! Pipelined execution support.
//!
//! This module contains the four inter-stage latches and the hazard
//! detection / register forwarding logic consumed by the step engine in
//! [`crate::core::cpu`].

/// Hazard detection and the forwarding network.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

pub use hazards::{forward_keys, forward_register, need_stall, StallReason};
pub use latches::{ExMem, IdEx, IfId, MemWb};
