//! Pipelined execution model.
//!
//! The step engine advances the whole pipeline by exactly one clock per
//! call. All five stage computations observe the same pre-step snapshot of
//! the latches and architectural state (double-buffering): the snapshots are
//! taken first, every new value is computed from them, and the latches are
//! replaced together at the end of the step.

use crate::common::Fault;
use crate::config::Config;
use crate::core::arch::ArchState;
use crate::core::memory::Memory;
use crate::core::pipeline::{need_stall, ExMem, IdEx, IfId, MemWb, StallReason};
use crate::core::stages::{
    decode::decode_stage, execute::execute_stage, fetch::fetch_stage,
    memory_access::mem_stage, write_back::wb_stage,
};
use crate::isa::{decode, Opcode, HALT_TARGET};
use crate::stats::SimStats;

/// Which opcode each of the five conceptual stages worked on during one
/// step, for tracing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageTrace {
    /// Instruction being fetched (at the pre-step program counter).
    pub fetch: Opcode,
    /// Instruction being decoded (IF/ID snapshot).
    pub decode: Opcode,
    /// Instruction being executed (ID/EX snapshot).
    pub execute: Opcode,
    /// Instruction in the memory stage (EX/MEM snapshot).
    pub memory: Opcode,
    /// Instruction writing back (MEM/WB snapshot).
    pub writeback: Opcode,
}

/// The 5-stage pipelined core.
pub struct PipelinedCpu {
    /// Architectural state (registers, keys, program counter).
    pub state: ArchState,
    /// Instruction and data memories.
    pub mem: Memory,

    if_id: IfId,
    id_ex: IdEx,
    ex_mem: ExMem,
    mem_wb: MemWb,

    /// Fatal fault, if one has occurred. Set once; the pipeline performs no
    /// further work after it is set.
    pub fault: Option<Fault>,
    /// Simulation statistics.
    pub stats: SimStats,

    trace: bool,
    cycle: u64,
}

impl PipelinedCpu {
    /// Creates a pipelined core over a pre-populated memory image.
    pub fn new(mem: Memory, config: &Config) -> Self {
        Self {
            state: ArchState::new(),
            mem,
            if_id: IfId::bubble(),
            id_ex: IdEx::bubble(),
            ex_mem: ExMem::bubble(),
            mem_wb: MemWb::bubble(),
            fault: None,
            stats: SimStats::default(),
            trace: config.general.trace_instructions,
            cycle: 0,
        }
    }

    /// Resets architectural state, latches, fault flag, and statistics to
    /// power-on values. Memory images are left as loaded.
    pub fn reset(&mut self) {
        self.state.reset();
        self.if_id = IfId::bubble();
        self.id_ex = IdEx::bubble();
        self.ex_mem = ExMem::bubble();
        self.mem_wb = MemWb::bubble();
        self.fault = None;
        self.stats = SimStats::default();
        self.cycle = 0;
    }

    /// Read-only view of the architectural state.
    pub fn state(&self) -> &ArchState {
        &self.state
    }

    /// Bounds-checked data-memory read for external inspection.
    pub fn read_memory_word(&self, addr: u16) -> Result<u16, Fault> {
        self.mem.read_data(addr)
    }

    /// True once the program counter sits at the halt sentinel and every
    /// latch holds a NOP or a drained HALT — nothing left in flight.
    pub fn is_drained(&self) -> bool {
        let drained = |op: Opcode| matches!(op, Opcode::Nop | Opcode::Halt);
        self.state.pc >= HALT_TARGET
            && drained(decode(self.if_id.inst).opcode)
            && drained(self.id_ex.d.opcode)
            && drained(self.ex_mem.d.opcode)
            && drained(self.mem_wb.d.opcode)
    }

    /// Advances the pipeline by exactly one clock cycle.
    ///
    /// Stage order is reverse pipeline order (WB, MEM, EX, ID, IF) so that
    /// every stage consumes the pre-step snapshots taken up front. A bounds
    /// fault in MEM is fail-stop: the fault flag is set, the program counter
    /// is forced to the halt sentinel, and the step returns before EX/ID/IF
    /// run. Returns the stage occupancy for this cycle.
    pub fn step(&mut self) -> StageTrace {
        // Snapshots: the only inputs any stage may observe this cycle.
        let if_id = self.if_id;
        let id_ex = self.id_ex;
        let ex_mem = self.ex_mem;
        let mem_wb = self.mem_wb;

        let trace = StageTrace {
            fetch: if self.state.pc < HALT_TARGET {
                decode(self.mem.read_instr(self.state.pc)).opcode
            } else {
                Opcode::Nop
            },
            decode: decode(if_id.inst).opcode,
            execute: id_ex.d.opcode,
            memory: ex_mem.d.opcode,
            writeback: mem_wb.d.opcode,
        };

        if self.fault.is_some() {
            return trace;
        }

        self.cycle += 1;
        self.stats.cycles += 1;

        if self.trace {
            self.print_pipeline_diagram(&trace);
        }

        // Writeback: commit the previous cycle's MEM/WB latch.
        wb_stage(&mem_wb, &mut self.state, &mut self.stats);

        // Memory: produce the instruction's writeback value (or fault).
        let mem_result = match mem_stage(&ex_mem, &mut self.mem) {
            Ok(result) => result,
            Err(fault) => {
                self.fault = Some(fault);
                self.state.pc = HALT_TARGET;
                self.mem_wb = MemWb::bubble();
                return trace;
            }
        };

        // Execute: ALU/address/cipher work and branch resolution.
        let ex_result = execute_stage(&id_ex, &mem_result, &mem_wb, &self.state);

        // Decode + hazard arbitration for the instruction in IF/ID.
        let decoded = decode(if_id.inst);
        let stall = need_stall(&id_ex, &decoded);

        if ex_result.branch_taken {
            // Control flush: the sequentially fetched instructions in IF/ID
            // and the decode result are wrong-path; squash them and redirect.
            self.state.pc = ex_result.branch_target;
            self.if_id = IfId::bubble();
            self.id_ex = IdEx::bubble();
            if ex_result.d.opcode == Opcode::Bne {
                self.stats.branches_taken += 1;
            }
            self.stats.control_flushes += 1;
        } else if let Some(reason) = stall {
            // Hold IF/ID and the program counter; bubble into ID/EX.
            self.id_ex = IdEx::bubble();
            match reason {
                StallReason::LoadUse => self.stats.stalls_load_use += 1,
                StallReason::KeyPending => self.stats.stalls_key += 1,
                StallReason::StoreData => self.stats.stalls_store_data += 1,
            }
        } else {
            self.id_ex = decode_stage(decoded, if_id.pc, &mem_result, &mem_wb, &self.state);
            let (next_if, next_pc) = fetch_stage(&self.mem, self.state.pc);
            self.if_id = next_if;
            self.state.pc = next_pc;
        }

        // Commit the remaining latches for the next cycle.
        self.ex_mem = ex_result;
        self.mem_wb = mem_result;

        trace
    }

    fn print_pipeline_diagram(&self, t: &StageTrace) {
        eprintln!(
            "Cycle {:>5} | IF:{:<4} ID:{:<4} EX:{:<4} MEM:{:<4} WB:{:<4} | PC={}",
            self.cycle,
            t.fetch.name(),
            t.decode.name(),
            t.execute.name(),
            t.memory.name(),
            t.writeback.name(),
            self.state.pc,
        );
    }
}
