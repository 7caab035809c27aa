use crate::core::memory::Memory;
use crate::core::pipeline::IfId;
use crate::isa::HALT_TARGET;

/// Fetches the instruction at `pc` and returns the new IF/ID latch plus the
/// incremented program counter. At or beyond the halt sentinel no new
/// instructions are produced and the program counter is held.
pub fn fetch_stage(mem: &Memory, pc: u16) -> (IfId, u16) {
    if pc >= HALT_TARGET {
        return (IfId::bubble(), pc);
    }

    let latch = IfId {
        inst: mem.read_instr(pc),
        pc,
    };
    (latch, pc + 1)
}
