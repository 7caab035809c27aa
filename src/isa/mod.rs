//! Instruction Set Architecture definitions.
//!
//! The machine executes fixed 16-bit words: bits[15:12] opcode, bits[11:9]
//! field1, bits[8:6] field2, bits[5:3] field3, bits[5:0] a signed 6-bit
//! immediate. field3 overlaps the immediate positionally; it is extracted by
//! the decoder but no opcode in this ISA consumes it as a register.

/// Instruction decoder and decoded-instruction types.
pub mod decode;

/// Raw-word encoding helpers for program construction.
pub mod encode;

pub use decode::{decode, DecodedInstr, Opcode};

/// Number of general-purpose registers.
pub const NUM_REGS: usize = 8;

/// Instruction memory size in 16-bit words.
pub const INSTR_MEM_SIZE: usize = 256;

/// Data memory size in 16-bit words.
pub const DATA_MEM_SIZE: usize = 1024;

/// Program-counter sentinel meaning "halted": one past the last valid
/// instruction address. Fetch stops producing instructions at or beyond it.
pub const HALT_TARGET: u16 = INSTR_MEM_SIZE as u16;

/// field1 selector value that targets the K0 key register in LDK.
pub const KEY0_SEL: u8 = 6;

/// field1 selector value that targets the K1 key register in LDK.
pub const KEY1_SEL: u8 = 7;
