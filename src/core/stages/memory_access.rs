use crate::common::Fault;
use crate::core::memory::Memory;
use crate::core::pipeline::{ExMem, MemWb};
use crate::isa::Opcode;

/// Performs the memory access for the instruction in EX/MEM and returns the
/// new MEM/WB latch.
///
/// LD/LDK read at the computed address; ST writes the carried store data;
/// ADDI/ENC/DEC pass the execute result through as the writeback value. Any
/// out-of-bounds address is a fatal fault handled by the step engine.
pub fn mem_stage(ex: &ExMem, mem: &mut Memory) -> Result<MemWb, Fault> {
    let mut write_val = 0;

    match ex.d.opcode {
        Opcode::Ld | Opcode::Ldk => {
            write_val = mem.read_data(ex.alu)?;
        }
        Opcode::St => {
            mem.write_data(ex.alu, ex.store_data)?;
        }
        Opcode::Addi | Opcode::Enc | Opcode::Dec => {
            write_val = ex.alu;
        }
        Opcode::Bne | Opcode::Halt | Opcode::Nop => {}
    }

    Ok(MemWb {
        d: ex.d,
        pc: ex.pc,
        write_val,
    })
}
