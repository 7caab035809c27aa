use crate::core::arch::ArchState;
use crate::core::pipeline::{forward_keys, forward_register, ExMem, IdEx, MemWb};
use crate::crypto;
use crate::isa::{Opcode, HALT_TARGET};

/// Executes the instruction in ID/EX and returns the new EX/MEM latch.
///
/// Register operands are re-resolved through the forwarding network here,
/// falling back to the value latched at decode: a producer that sat in ID/EX
/// at decode time (invisible to decode-time forwarding) is in EX/MEM by now
/// and is caught without a stall. Store data is the exception — it is read
/// at decode only, and hazard rule 3 keeps it fresh.
///
/// BNE and HALT resolve here: `branch_taken`/`branch_target` direct the step
/// engine to override the program counter (a taken BNE targets
/// pc + 1 + imm; HALT targets the halt sentinel).
pub fn execute_stage(id_ex: &IdEx, mem_result: &MemWb, wb: &MemWb, state: &ArchState) -> ExMem {
    let d = id_ex.d;
    let (rs_a, rs_b) = d.reads();

    let fwd = |reg: Option<u8>, latched: u16| -> u16 {
        match reg {
            Some(r) => forward_register(r, mem_result, wb, latched),
            None => latched,
        }
    };

    let mut out = ExMem {
        d,
        pc: id_ex.pc,
        alu: 0,
        store_data: id_ex.rv_b,
        branch_taken: false,
        branch_target: 0,
    };

    match d.opcode {
        Opcode::Ld | Opcode::St | Opcode::Ldk => {
            let base = fwd(rs_a, id_ex.rv_a);
            out.alu = base.wrapping_add(d.imm as u16);
        }
        Opcode::Addi => {
            let src = fwd(rs_a, id_ex.rv_a);
            out.alu = src.wrapping_add(d.imm as u16);
        }
        Opcode::Enc | Opcode::Dec => {
            let block = fwd(rs_a, id_ex.rv_a);
            let (k0, k1) = forward_keys(mem_result, wb, state);
            out.alu = if d.opcode == Opcode::Enc {
                crypto::encrypt(block, k0, k1)
            } else {
                crypto::decrypt(block, k0, k1)
            };
        }
        Opcode::Bne => {
            let a = fwd(rs_a, id_ex.rv_a);
            let b = fwd(rs_b, id_ex.rv_b);
            if a != b {
                out.branch_taken = true;
                out.branch_target = id_ex.pc.wrapping_add(1).wrapping_add(d.imm as u16);
            }
        }
        Opcode::Halt => {
            out.branch_taken = true;
            out.branch_target = HALT_TARGET;
        }
        Opcode::Nop => {}
    }

    out
}
