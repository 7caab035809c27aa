use crate::core::arch::ArchState;
use crate::core::pipeline::MemWb;
use crate::isa::{Opcode, KEY0_SEL, KEY1_SEL};
use crate::stats::SimStats;

/// Commits the instruction in MEM/WB to architectural state.
///
/// LD/ADDI/ENC/DEC write the destination register; LDK writes K0 or K1 per
/// its selector (any other selector is a no-op). ST/BNE/NOP/HALT have no
/// register-file effect. Retired-instruction statistics are counted here.
pub fn wb_stage(wb: &MemWb, state: &mut ArchState, stats: &mut SimStats) {
    match wb.d.opcode {
        Opcode::Ld => {
            state.regs.write(wb.d.f1, wb.write_val);
            stats.inst_load += 1;
        }
        Opcode::Addi => {
            state.regs.write(wb.d.f1, wb.write_val);
            stats.inst_alu += 1;
        }
        Opcode::Enc | Opcode::Dec => {
            state.regs.write(wb.d.f1, wb.write_val);
            stats.inst_cipher += 1;
        }
        Opcode::Ldk => {
            match wb.d.f1 {
                sel if sel == KEY0_SEL => state.k0 = wb.write_val,
                sel if sel == KEY1_SEL => state.k1 = wb.write_val,
                _ => {}
            }
            stats.inst_key_load += 1;
        }
        Opcode::St => {
            stats.inst_store += 1;
        }
        Opcode::Bne => {
            stats.inst_branch += 1;
        }
        Opcode::Halt | Opcode::Nop => return,
    }

    stats.instructions_retired += 1;
}
