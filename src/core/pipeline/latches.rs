//! Pipeline latch structures for inter-stage communication.
//!
//! The four latches are the pipeline's entire in-flight state. Each holds
//! exactly one instruction (or a NOP bubble) per cycle boundary, and is
//! snapshotted at the start of a step, never mutated in place mid-cycle: all
//! stages of one clock observe the same pre-step state.

use crate::isa::{DecodedInstr, Opcode};

/// IF/ID latch (Fetch to Decode): the raw word and its program counter.
#[derive(Clone, Copy, Debug)]
pub struct IfId {
    /// Raw 16-bit instruction word.
    pub inst: u16,
    /// Program counter of this instruction.
    pub pc: u16,
}

impl IfId {
    /// A NOP bubble.
    pub fn bubble() -> Self {
        Self {
            inst: Opcode::Nop.to_bits() << 12,
            pc: 0,
        }
    }
}

impl Default for IfId {
    fn default() -> Self {
        Self::bubble()
    }
}

/// ID/EX latch (Decode to Execute): the decoded instruction and its operand
/// values as resolved by the decode-time forwarding network.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdEx {
    /// Decoded instruction.
    pub d: DecodedInstr,
    /// Program counter of this instruction.
    pub pc: u16,
    /// First operand value (base register / ALU source / BNE first operand).
    pub rv_a: u16,
    /// Second operand value (ST: store data; BNE: second compare operand).
    pub rv_b: u16,
}

impl IdEx {
    /// A NOP bubble.
    pub fn bubble() -> Self {
        Self::default()
    }
}

/// EX/MEM latch (Execute to Memory): ALU/address result, carried store data,
/// and branch resolution.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExMem {
    /// Decoded instruction.
    pub d: DecodedInstr,
    /// Program counter of this instruction.
    pub pc: u16,
    /// Effective address for LD/ST/LDK, result for ADDI/ENC/DEC.
    pub alu: u16,
    /// Store data carried through for ST.
    pub store_data: u16,
    /// Whether a branch (or HALT) resolved taken this cycle.
    pub branch_taken: bool,
    /// Branch target; the halt sentinel for HALT.
    pub branch_target: u16,
}

impl ExMem {
    /// A NOP bubble.
    pub fn bubble() -> Self {
        Self::default()
    }
}

/// MEM/WB latch (Memory to Writeback): the value to commit.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemWb {
    /// Decoded instruction.
    pub d: DecodedInstr,
    /// Program counter of this instruction.
    pub pc: u16,
    /// Value committed to a register (LD/ADDI/ENC/DEC) or key register (LDK).
    pub write_val: u16,
}

impl MemWb {
    /// A NOP bubble.
    pub fn bubble() -> Self {
        Self::default()
    }
}
