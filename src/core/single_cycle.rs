//! Single-cycle reference model.
//!
//! One instruction fetches, executes, and retires per step. Architecturally
//! equivalent to the pipelined model and used as its correctness oracle:
//! running any program to completion under both models yields identical
//! final registers, keys, and data memory.

use crate::common::Fault;
use crate::core::arch::ArchState;
use crate::core::memory::Memory;
use crate::crypto;
use crate::isa::{decode, Opcode, HALT_TARGET, KEY0_SEL, KEY1_SEL};

/// The single-cycle core.
pub struct SingleCycleCpu {
    /// Architectural state (registers, keys, program counter).
    pub state: ArchState,
    /// Instruction and data memories.
    pub mem: Memory,
    /// Fatal fault, if one has occurred.
    pub fault: Option<Fault>,
}

impl SingleCycleCpu {
    /// Creates a single-cycle core over a pre-populated memory image.
    pub fn new(mem: Memory) -> Self {
        Self {
            state: ArchState::new(),
            mem,
            fault: None,
        }
    }

    /// Resets architectural state and the fault flag; memory images are left
    /// as loaded.
    pub fn reset(&mut self) {
        self.state.reset();
        self.fault = None;
    }

    /// Read-only view of the architectural state.
    pub fn state(&self) -> &ArchState {
        &self.state
    }

    /// Bounds-checked data-memory read for external inspection.
    pub fn read_memory_word(&self, addr: u16) -> Result<u16, Fault> {
        self.mem.read_data(addr)
    }

    /// True once the program counter has left the instruction memory (HALT,
    /// fall-through, or a wild branch) or a fault has occurred.
    pub fn is_halted(&self) -> bool {
        self.fault.is_some() || self.state.pc >= HALT_TARGET
    }

    /// Executes exactly one instruction. Returns the opcode executed.
    pub fn step(&mut self) -> Opcode {
        if self.is_halted() {
            return Opcode::Nop;
        }

        let d = decode(self.mem.read_instr(self.state.pc));

        // Default next PC; branch and halt override it below.
        self.state.pc += 1;

        let result = match d.opcode {
            Opcode::Ld => {
                let ea = self.state.regs.read(d.f2).wrapping_add(d.imm as u16);
                self.mem.read_data(ea).map(|val| {
                    self.state.regs.write(d.f1, val);
                })
            }
            Opcode::St => {
                let ea = self.state.regs.read(d.f2).wrapping_add(d.imm as u16);
                self.mem.write_data(ea, self.state.regs.read(d.f1))
            }
            Opcode::Addi => {
                let val = self.state.regs.read(d.f2).wrapping_add(d.imm as u16);
                self.state.regs.write(d.f1, val);
                Ok(())
            }
            Opcode::Ldk => {
                let ea = self.state.regs.read(d.f2).wrapping_add(d.imm as u16);
                self.mem.read_data(ea).map(|val| match d.f1 {
                    sel if sel == KEY0_SEL => self.state.k0 = val,
                    sel if sel == KEY1_SEL => self.state.k1 = val,
                    _ => {}
                })
            }
            Opcode::Enc => {
                let block = self.state.regs.read(d.f2);
                let out = crypto::encrypt(block, self.state.k0, self.state.k1);
                self.state.regs.write(d.f1, out);
                Ok(())
            }
            Opcode::Dec => {
                let block = self.state.regs.read(d.f2);
                let out = crypto::decrypt(block, self.state.k0, self.state.k1);
                self.state.regs.write(d.f1, out);
                Ok(())
            }
            Opcode::Bne => {
                if self.state.regs.read(d.f1) != self.state.regs.read(d.f2) {
                    // PC already incremented: target = branch_pc + 1 + imm.
                    self.state.pc = self.state.pc.wrapping_add(d.imm as u16);
                }
                Ok(())
            }
            Opcode::Halt => {
                self.state.pc = HALT_TARGET;
                Ok(())
            }
            Opcode::Nop => Ok(()),
        };

        if let Err(fault) = result {
            self.fault = Some(fault);
            self.state.pc = HALT_TARGET;
        }

        d.opcode
    }
}
