//! Architectural state.
//!
//! The register file, the two cipher-key registers, and the program counter
//! are the only externally visible machine state. Registers and keys are
//! mutated exclusively by the writeback stage; the program counter by fetch
//! and by branch/halt resolution.

use crate::isa::NUM_REGS;

/// General-purpose register file (R0..R7).
///
/// All eight registers are writable; there is no hardwired zero.
#[derive(Clone, Debug, Default)]
pub struct RegisterFile {
    regs: [u16; NUM_REGS],
}

impl RegisterFile {
    /// Creates a register file with all registers zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads register `idx`. The index is masked to the 3-bit field width.
    pub fn read(&self, idx: u8) -> u16 {
        self.regs[(idx as usize) % NUM_REGS]
    }

    /// Writes `val` to register `idx`.
    pub fn write(&mut self, idx: u8, val: u16) {
        self.regs[(idx as usize) % NUM_REGS] = val;
    }

    /// Dumps all registers to stdout, two per line.
    pub fn dump(&self) {
        for i in (0..NUM_REGS).step_by(2) {
            println!(
                "R{}={:#06x} R{}={:#06x}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1]
            );
        }
    }
}

/// Full architectural state of one core.
#[derive(Clone, Debug, Default)]
pub struct ArchState {
    /// General-purpose registers.
    pub regs: RegisterFile,
    /// First cipher key register.
    pub k0: u16,
    /// Second cipher key register.
    pub k1: u16,
    /// Program counter; range \[0, instruction-memory size\].
    pub pc: u16,
}

impl ArchState {
    /// Power-on state: everything zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets all registers, keys, and the program counter to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
