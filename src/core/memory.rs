//! Instruction and data memories.
//!
//! Two fixed-size, zero-initialized word stores owned by the simulator
//! instance. Data accesses are bounds-checked and report architectural
//! faults; instruction fetch is guarded by the halt sentinel and never
//! faults.

use crate::common::Fault;
use crate::isa::{DATA_MEM_SIZE, INSTR_MEM_SIZE};

/// Fixed-size instruction and data stores.
#[derive(Clone, Debug)]
pub struct Memory {
    instr: Vec<u16>,
    data: Vec<u16>,
}

impl Memory {
    /// Creates zero-filled memories.
    pub fn new() -> Self {
        Self {
            instr: vec![0; INSTR_MEM_SIZE],
            data: vec![0; DATA_MEM_SIZE],
        }
    }

    /// Clears both memories to zero.
    pub fn clear(&mut self) {
        self.instr.fill(0);
        self.data.fill(0);
    }

    /// Reads the instruction word at `pc`.
    ///
    /// Callers guard `pc` against the halt sentinel; out-of-range reads
    /// return an all-zero word (which decodes to LD R0, 0(R0) and is never
    /// reachable because fetch stops at the sentinel).
    pub fn read_instr(&self, pc: u16) -> u16 {
        self.instr.get(pc as usize).copied().unwrap_or(0)
    }

    /// Writes one instruction word. Out-of-range writes are ignored; image
    /// size validation happens in the loader before the core runs.
    pub fn write_instr(&mut self, pc: u16, word: u16) {
        if let Some(slot) = self.instr.get_mut(pc as usize) {
            *slot = word;
        }
    }

    /// Bounds-checked data-memory read.
    pub fn read_data(&self, addr: u16) -> Result<u16, Fault> {
        self.data
            .get(addr as usize)
            .copied()
            .ok_or(Fault::LoadOutOfBounds { addr })
    }

    /// Bounds-checked data-memory write.
    pub fn write_data(&mut self, addr: u16, val: u16) -> Result<(), Fault> {
        match self.data.get_mut(addr as usize) {
            Some(slot) => {
                *slot = val;
                Ok(())
            }
            None => Err(Fault::StoreOutOfBounds { addr }),
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
