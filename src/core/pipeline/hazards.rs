//! Data hazard detection and register forwarding.
//!
//! The hazard unit is a pure function of the ID/EX latch contents *before*
//! this cycle's stage advance and the instruction being decoded. The
//! forwarding network resolves a register's effective value from the
//! freshest in-flight producer, falling back to the register file.

use crate::core::arch::ArchState;
use crate::core::pipeline::latches::{IdEx, MemWb};
use crate::isa::{DecodedInstr, Opcode, KEY0_SEL, KEY1_SEL};

/// Why the decode stage must stall this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StallReason {
    /// The instruction entering Execute is a load whose destination is a
    /// source of the instruction being decoded.
    LoadUse,
    /// A LDK is in Execute and the decoding instruction is ENC/DEC; the key
    /// value is not forwardable until the load reaches MEM/WB.
    KeyPending,
    /// The decoding instruction is ST and its store-data register is the
    /// destination of the producer in Execute; store data is read at decode,
    /// before the producer's result exists.
    StoreData,
}

/// Checks whether decoding `next` must stall, given the instruction entering
/// Execute this cycle. Rules are evaluated in priority order.
pub fn need_stall(id_ex: &IdEx, next: &DecodedInstr) -> Option<StallReason> {
    let ex = &id_ex.d;

    // Rule 1: load-use. LDK's "destination" is its key selector (6/7); a
    // collision with a consumer of R6/R7 stalls spuriously but harmlessly,
    // since the register-file value is already correct.
    if ex.opcode.is_load() {
        let (a, b) = next.reads();
        if a == Some(ex.f1) || b == Some(ex.f1) {
            return Some(StallReason::LoadUse);
        }
    }

    // Rule 2: key-load ordering.
    if ex.opcode == Opcode::Ldk && matches!(next.opcode, Opcode::Enc | Opcode::Dec) {
        return Some(StallReason::KeyPending);
    }

    // Rule 3: store-data freshness.
    if next.opcode == Opcode::St && ex.dest() == Some(next.f1) {
        return Some(StallReason::StoreData);
    }

    None
}

/// Resolves the effective value of register `reg` by recency.
///
/// `mem_result` is the MEM/WB entry produced by the memory stage *this*
/// cycle, i.e. the instruction that sat in EX/MEM at the snapshot — the
/// freshest in-flight producer (and the only place a LD's value exists).
/// `wb` is the MEM/WB latch snapshot, one instruction older. When neither
/// produces `reg`, the caller-supplied `fallback` (register-file read or the
/// decode-time latched value) applies.
pub fn forward_register(reg: u8, mem_result: &MemWb, wb: &MemWb, fallback: u16) -> u16 {
    if let Some(val) = producer_value(mem_result, reg) {
        return val;
    }
    if let Some(val) = producer_value(wb, reg) {
        return val;
    }
    fallback
}

/// Resolves the effective (K0, K1) pair for a cipher instruction in Execute.
///
/// A LDK whose key value is in flight (just produced by the memory stage, or
/// sitting in MEM/WB about to commit) wins over the architectural registers,
/// freshest first.
pub fn forward_keys(mem_result: &MemWb, wb: &MemWb, state: &ArchState) -> (u16, u16) {
    let mut k0 = state.k0;
    let mut k1 = state.k1;

    for latch in [wb, mem_result] {
        if latch.d.opcode == Opcode::Ldk {
            match latch.d.f1 {
                sel if sel == KEY0_SEL => k0 = latch.write_val,
                sel if sel == KEY1_SEL => k1 = latch.write_val,
                _ => {}
            }
        }
    }

    (k0, k1)
}

fn producer_value(latch: &MemWb, reg: u8) -> Option<u16> {
    if latch.d.dest() == Some(reg) {
        Some(latch.write_val)
    } else {
        None
    }
}
