//! Cycle-bounded run loop.
//!
//! Both models are externally driven cycle-by-cycle; the run loop stops when
//! the machine has drained (program counter at the halt sentinel and, for
//! the pipeline, all latches empty), when the caller's cycle budget is
//! exhausted, or when a fault occurs.

use crate::common::Fault;
use crate::core::{PipelinedCpu, SingleCycleCpu};

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The machine halted and (for the pipeline) fully drained.
    Halted,
    /// The caller's maximum-cycle bound was reached first.
    CycleBudgetExhausted,
    /// A fatal architectural fault occurred.
    Faulted(Fault),
}

/// Result of a completed run.
#[derive(Clone, Copy, Debug)]
pub struct RunOutcome {
    /// Why the run stopped.
    pub reason: StopReason,
    /// Clock cycles (or retired instructions, for the single-cycle model)
    /// consumed.
    pub cycles: u64,
}

impl RunOutcome {
    /// True if the run ended by halting normally.
    pub fn halted(&self) -> bool {
        self.reason == StopReason::Halted
    }
}

/// Drives the pipelined core until it drains, faults, or exhausts
/// `max_cycles`.
pub fn run_pipelined(cpu: &mut PipelinedCpu, max_cycles: u64) -> RunOutcome {
    let mut cycles = 0;
    while cycles < max_cycles {
        if let Some(fault) = cpu.fault {
            return RunOutcome {
                reason: StopReason::Faulted(fault),
                cycles,
            };
        }
        if cpu.is_drained() {
            return RunOutcome {
                reason: StopReason::Halted,
                cycles,
            };
        }
        let _ = cpu.step();
        cycles += 1;
    }

    if let Some(fault) = cpu.fault {
        return RunOutcome {
            reason: StopReason::Faulted(fault),
            cycles,
        };
    }
    if cpu.is_drained() {
        return RunOutcome {
            reason: StopReason::Halted,
            cycles,
        };
    }
    RunOutcome {
        reason: StopReason::CycleBudgetExhausted,
        cycles,
    }
}

/// Drives the single-cycle core until it halts, faults, or exhausts
/// `max_cycles` instructions.
pub fn run_single_cycle(cpu: &mut SingleCycleCpu, max_cycles: u64) -> RunOutcome {
    let mut cycles = 0;
    while cycles < max_cycles {
        if let Some(fault) = cpu.fault {
            return RunOutcome {
                reason: StopReason::Faulted(fault),
                cycles,
            };
        }
        if cpu.is_halted() {
            return RunOutcome {
                reason: StopReason::Halted,
                cycles,
            };
        }
        let _ = cpu.step();
        cycles += 1;
    }

    if let Some(fault) = cpu.fault {
        return RunOutcome {
            reason: StopReason::Faulted(fault),
            cycles,
        };
    }
    if cpu.is_halted() {
        return RunOutcome {
            reason: StopReason::Halted,
            cycles,
        };
    }
    RunOutcome {
        reason: StopReason::CycleBudgetExhausted,
        cycles,
    }
}
