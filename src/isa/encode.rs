//! Raw-word encoding helpers.
//!
//! Collaborator-layer utilities for building program images; the core only
//! ever sees the encoded words.

use super::Opcode;

/// Encodes an I-format instruction (LD, ST, ADDI, LDK, BNE): opcode, f1, f2
/// and a 6-bit signed immediate.
pub fn encode_i(op: Opcode, f1: u8, f2: u8, imm: i8) -> u16 {
    (op.to_bits() << 12) | (((f1 & 0x7) as u16) << 9) | (((f2 & 0x7) as u16) << 6) | imm6(imm)
}

/// Encodes an R-format instruction (ENC, DEC): opcode, destination, source.
pub fn encode_r(op: Opcode, rd: u8, rs: u8) -> u16 {
    (op.to_bits() << 12) | (((rd & 0x7) as u16) << 9) | (((rs & 0x7) as u16) << 6)
}

/// LD rt, imm(rs)
pub fn ld(rt: u8, rs: u8, imm: i8) -> u16 {
    encode_i(Opcode::Ld, rt, rs, imm)
}

/// ST rt, imm(rs) — stores R\[rt\] to data\[R\[rs\] + imm\].
pub fn st(rt: u8, rs: u8, imm: i8) -> u16 {
    encode_i(Opcode::St, rt, rs, imm)
}

/// ADDI rt, rs, imm
pub fn addi(rt: u8, rs: u8, imm: i8) -> u16 {
    encode_i(Opcode::Addi, rt, rs, imm)
}

/// LDK sel, imm(rs) — sel is 6 for K0, 7 for K1.
pub fn ldk(sel: u8, rs: u8, imm: i8) -> u16 {
    encode_i(Opcode::Ldk, sel, rs, imm)
}

/// ENC rd, rs
pub fn enc(rd: u8, rs: u8) -> u16 {
    encode_r(Opcode::Enc, rd, rs)
}

/// DEC rd, rs
pub fn dec(rd: u8, rs: u8) -> u16 {
    encode_r(Opcode::Dec, rd, rs)
}

/// BNE r1, r2, offset — taken target is pc + 1 + offset.
pub fn bne(r1: u8, r2: u8, offset: i8) -> u16 {
    encode_i(Opcode::Bne, r1, r2, offset)
}

/// HALT
pub fn halt() -> u16 {
    Opcode::Halt.to_bits() << 12
}

/// NOP
pub fn nop() -> u16 {
    Opcode::Nop.to_bits() << 12
}

fn imm6(imm: i8) -> u16 {
    debug_assert!(
        (-32..=31).contains(&imm),
        "immediate {imm} out of 6-bit signed range"
    );
    (imm as u16) & 0x3F
}
