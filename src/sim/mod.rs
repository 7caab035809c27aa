//! Simulation harness.
//!
//! Everything outside the core: memory-image loading and validation, the
//! built-in demo program, and the cycle-bounded run loop shared by both
//! execution models.

/// Memory-image parsing and validation.
pub mod loader;

/// Built-in demo programs.
pub mod programs;

/// Cycle-bounded run loop and outcome reporting.
pub mod runner;

pub use runner::{run_pipelined, run_single_cycle, RunOutcome, StopReason};
