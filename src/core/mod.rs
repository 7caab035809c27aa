//! Processor core implementation.
//!
//! Each simulator instance owns its architectural state and memories; there
//! are no process-wide globals, so independent runs (e.g. parallel tests)
//! never share state.

/// Architectural state: register file, key registers, program counter.
pub mod arch;

/// Pipelined execution model: step engine and stage trace.
pub mod cpu;

/// Instruction and data memories with bounds-checked access.
pub mod memory;

/// Pipeline latches and the hazard/forwarding unit.
pub mod pipeline;

/// Single-cycle reference model.
pub mod single_cycle;

/// Pipeline stage implementations (fetch, decode, execute, memory,
/// writeback).
pub mod stages;

pub use arch::ArchState;
pub use cpu::{PipelinedCpu, StageTrace};
pub use memory::Memory;
pub use single_cycle::SingleCycleCpu;
