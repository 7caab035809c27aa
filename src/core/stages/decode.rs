use crate::core::arch::ArchState;
use crate::core::pipeline::{forward_register, IdEx, MemWb};
use crate::isa::DecodedInstr;

/// Builds the new ID/EX latch: resolves the decoded instruction's operand
/// registers through the forwarding network, falling back to the register
/// file.
///
/// `mem_result` and `wb` are this cycle's memory-stage output and the MEM/WB
/// snapshot; see [`forward_register`] for the recency order.
pub fn decode_stage(
    d: DecodedInstr,
    pc: u16,
    mem_result: &MemWb,
    wb: &MemWb,
    state: &ArchState,
) -> IdEx {
    let (rs_a, rs_b) = d.reads();

    let resolve = |reg: Option<u8>| -> u16 {
        match reg {
            Some(r) => forward_register(r, mem_result, wb, state.regs.read(r)),
            None => 0,
        }
    };

    IdEx {
        rv_a: resolve(rs_a),
        rv_b: resolve(rs_b),
        d,
        pc,
    }
}
