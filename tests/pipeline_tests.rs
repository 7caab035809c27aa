//! End-to-end tests for the 5-stage pipelined model: hazard handling,
//! forwarding, control flushes, faults, and drain behavior.

use cryptcore::common::Fault;
use cryptcore::config::Config;
use cryptcore::core::{Memory, PipelinedCpu};
use cryptcore::crypto;
use cryptcore::isa::{encode, HALT_TARGET};
use cryptcore::sim::{run_pipelined, StopReason};

/// Creates a pipelined core over the given program and initial data image.
fn cpu_with(program: &[u16], data: &[u16]) -> PipelinedCpu {
    let mut mem = Memory::new();
    for (pc, &word) in program.iter().enumerate() {
        mem.write_instr(pc as u16, word);
    }
    for (addr, &word) in data.iter().enumerate() {
        mem.write_data(addr as u16, word).unwrap();
    }
    PipelinedCpu::new(mem, &Config::default())
}

/// Runs a core to completion under the default cycle budget.
fn run(cpu: &mut PipelinedCpu) -> cryptcore::sim::RunOutcome {
    run_pipelined(cpu, Config::default().general.max_cycles)
}

/// Tests the full encrypt-then-decrypt block scenario.
#[test]
fn test_single_block_encrypt_decrypt() {
    let key = 0x1234;
    let plaintext = 0xABCD;
    let program = [
        encode::ldk(6, 0, 0),
        encode::ld(1, 0, 1),
        encode::enc(2, 1),
        encode::st(2, 0, 2),
        encode::dec(3, 2),
        encode::st(3, 0, 3),
        encode::halt(),
    ];
    let mut cpu = cpu_with(&program, &[key, plaintext]);

    let outcome = run(&mut cpu);

    assert_eq!(outcome.reason, StopReason::Halted);
    assert_eq!(
        cpu.read_memory_word(2).unwrap(),
        crypto::encrypt(plaintext, key, 0),
        "The stored ciphertext should match the cipher directly"
    );
    assert_eq!(
        cpu.read_memory_word(3).unwrap(),
        plaintext,
        "Decrypting the ciphertext should recover the plaintext"
    );
    assert_eq!(cpu.state().k0, key);
}

/// Tests that a load-use dependency costs exactly one stall cycle.
#[test]
fn test_load_use_stalls_exactly_once() {
    let program = [
        encode::ld(1, 0, 0),
        encode::addi(2, 1, 0),
        encode::halt(),
    ];
    let mut cpu = cpu_with(&program, &[42]);

    let outcome = run(&mut cpu);

    assert_eq!(outcome.reason, StopReason::Halted);
    assert_eq!(cpu.state().regs.read(2), 42, "The loaded value must forward");
    assert_eq!(cpu.stats.stalls_load_use, 1);
    assert_eq!(cpu.stats.stalls_key, 0);
    assert_eq!(cpu.stats.stalls_store_data, 0);
}

/// Tests that a NOP between a load and its consumer removes the stall, at
/// the same total cycle cost.
#[test]
fn test_nop_replaces_load_use_stall() {
    let dependent = [
        encode::ld(1, 0, 0),
        encode::addi(2, 1, 0),
        encode::halt(),
    ];
    let padded = [
        encode::ld(1, 0, 0),
        encode::nop(),
        encode::addi(2, 1, 0),
        encode::halt(),
    ];

    let mut cpu_a = cpu_with(&dependent, &[42]);
    let mut cpu_b = cpu_with(&padded, &[42]);
    let out_a = run(&mut cpu_a);
    let out_b = run(&mut cpu_b);

    assert_eq!(cpu_a.stats.stalls_load_use, 1);
    assert_eq!(cpu_b.stats.stalls_load_use, 0);
    assert_eq!(cpu_a.state().regs.read(2), cpu_b.state().regs.read(2));
    assert_eq!(
        out_a.cycles, out_b.cycles,
        "One stall and one NOP slot should cost the same"
    );
}

/// Tests that back-to-back ALU producers forward without any stall.
#[test]
fn test_alu_forwarding_without_stall() {
    let program = [
        encode::addi(1, 0, 5),
        encode::addi(2, 1, 3),
        encode::halt(),
    ];
    let mut cpu = cpu_with(&program, &[]);

    run(&mut cpu);

    assert_eq!(cpu.state().regs.read(2), 8, "R2 = (R0 + 5) + 3");
    assert_eq!(cpu.stats.stalls_load_use, 0);
    assert_eq!(cpu.stats.stalls_key, 0);
    assert_eq!(cpu.stats.stalls_store_data, 0);
}

/// Tests the key-ordering stall: ENC immediately after LDK waits one cycle
/// and then sees the new key.
#[test]
fn test_key_load_ordering_stall() {
    let key = 0x1234;
    let program = [encode::ldk(6, 0, 0), encode::enc(1, 0), encode::halt()];
    let mut cpu = cpu_with(&program, &[key]);

    run(&mut cpu);

    assert_eq!(cpu.stats.stalls_key, 1);
    assert_eq!(
        cpu.state().regs.read(1),
        crypto::encrypt(0, key, 0),
        "ENC must use the freshly loaded key, not the stale zero"
    );
}

/// Tests that an LDK with a selector other than 6 or 7 drains through the
/// pipeline without touching the keys or the register file.
#[test]
fn test_ldk_other_selector_is_noop() {
    let program = [
        encode::ldk(3, 0, 0),
        encode::enc(1, 0),
        encode::halt(),
    ];
    let mut cpu = cpu_with(&program, &[0x4444]);

    let outcome = run(&mut cpu);

    assert_eq!(outcome.reason, StopReason::Halted);
    assert_eq!(cpu.state().k0, 0, "K0 must only respond to selector 6");
    assert_eq!(cpu.state().k1, 0, "K1 must only respond to selector 7");
    assert_eq!(cpu.state().regs.read(3), 0, "LDK must not write R3");
    assert_eq!(
        cpu.state().regs.read(1),
        crypto::encrypt(0, 0, 0),
        "ENC must see the untouched zero keys"
    );
}

/// Tests the store-data stall: ST immediately after its data producer waits
/// one cycle and stores the fresh value.
#[test]
fn test_store_data_stall() {
    let program = [
        encode::addi(1, 0, 7),
        encode::st(1, 0, 0),
        encode::halt(),
    ];
    let mut cpu = cpu_with(&program, &[]);

    run(&mut cpu);

    assert_eq!(cpu.stats.stalls_store_data, 1);
    assert_eq!(cpu.read_memory_word(0).unwrap(), 7);
}

/// Tests that a taken branch squashes the sequentially fetched instruction.
#[test]
fn test_taken_branch_squashes_wrong_path() {
    let program = [
        encode::addi(1, 0, 1),
        encode::bne(1, 0, 1), // skip the next instruction
        encode::addi(2, 0, 0x11),
        encode::addi(3, 0, 0x1F),
        encode::halt(),
    ];
    let mut cpu = cpu_with(&program, &[]);

    run(&mut cpu);

    assert_eq!(cpu.state().regs.read(2), 0, "The skipped ADDI must not commit");
    assert_eq!(cpu.state().regs.read(3), 0x1F);
    assert_eq!(cpu.stats.branches_taken, 1);
}

/// Tests that a not-taken branch falls through.
#[test]
fn test_not_taken_branch_falls_through() {
    let program = [
        encode::bne(0, 0, 1),
        encode::addi(2, 0, 0x11),
        encode::halt(),
    ];
    let mut cpu = cpu_with(&program, &[]);

    run(&mut cpu);

    assert_eq!(cpu.state().regs.read(2), 0x11);
    assert_eq!(cpu.stats.branches_taken, 0);
}

/// Tests a backward-branch countdown loop, including the branch target
/// arithmetic (pc + 1 + imm).
#[test]
fn test_backward_branch_loop() {
    let program = [
        encode::addi(1, 0, 3),
        encode::addi(1, 1, -1),
        encode::bne(1, 0, -2), // back to the decrement while R1 != 0
        encode::halt(),
    ];
    let mut cpu = cpu_with(&program, &[]);

    let outcome = run(&mut cpu);

    assert_eq!(outcome.reason, StopReason::Halted);
    assert_eq!(cpu.state().regs.read(1), 0);
    assert_eq!(cpu.stats.branches_taken, 2, "Taken at R1 = 2 and R1 = 1");
}

/// Tests fail-stop on an out-of-bounds load: the fault is reported, the
/// program counter parks at the halt sentinel, and younger instructions
/// never commit.
#[test]
fn test_load_fault_is_fail_stop() {
    let program = [
        encode::addi(1, 0, -1), // R1 = 0xFFFF
        encode::ld(2, 1, 0),    // faulting address
        encode::addi(3, 0, 5),  // must be squashed
        encode::halt(),
    ];
    let mut cpu = cpu_with(&program, &[]);

    let outcome = run(&mut cpu);

    assert_eq!(
        outcome.reason,
        StopReason::Faulted(Fault::LoadOutOfBounds { addr: 0xFFFF })
    );
    assert_eq!(cpu.state().pc, HALT_TARGET);
    assert_eq!(cpu.state().regs.read(1), 0xFFFF, "Older work still commits");
    assert_eq!(cpu.state().regs.read(2), 0);
    assert_eq!(cpu.state().regs.read(3), 0, "Younger work must be squashed");
}

/// Tests fail-stop on an out-of-bounds store.
#[test]
fn test_store_fault_is_fail_stop() {
    let program = [
        encode::addi(1, 0, -1),
        encode::st(1, 1, 0), // data[0xFFFF] = R1
        encode::halt(),
    ];
    let mut cpu = cpu_with(&program, &[]);

    let outcome = run(&mut cpu);

    assert_eq!(
        outcome.reason,
        StopReason::Faulted(Fault::StoreOutOfBounds { addr: 0xFFFF })
    );
}

/// Tests that stepping a faulted core performs no further work.
#[test]
fn test_step_after_fault_is_inert() {
    let program = [encode::ld(1, 0, -1), encode::halt()];
    let mut cpu = cpu_with(&program, &[]);

    run(&mut cpu);
    assert!(cpu.fault.is_some());

    let cycles_at_fault = cpu.stats.cycles;
    let regs_at_fault: Vec<u16> = (0..8).map(|r| cpu.state().regs.read(r)).collect();

    cpu.step();
    cpu.step();

    assert_eq!(cpu.stats.cycles, cycles_at_fault, "No cycles after a fault");
    let regs_after: Vec<u16> = (0..8).map(|r| cpu.state().regs.read(r)).collect();
    assert_eq!(regs_after, regs_at_fault);
}

/// Tests that HALT drains the pipeline completely.
#[test]
fn test_halt_drains_pipeline() {
    let program = [encode::addi(1, 0, 1), encode::halt()];
    let mut cpu = cpu_with(&program, &[]);

    let outcome = run(&mut cpu);

    assert_eq!(outcome.reason, StopReason::Halted);
    assert!(cpu.is_drained());
    assert_eq!(cpu.state().pc, HALT_TARGET);
    assert_eq!(cpu.state().regs.read(1), 1, "Work ahead of HALT still commits");
}

/// Tests that a program without HALT terminates by walking off the end of
/// instruction memory.
#[test]
fn test_fall_through_termination() {
    let program = [encode::addi(1, 0, 1)];
    let mut cpu = cpu_with(&program, &[]);

    let outcome = run(&mut cpu);

    assert_eq!(outcome.reason, StopReason::Halted);
    assert_eq!(cpu.state().pc, HALT_TARGET);
}

/// Tests the stage occupancy reported by single steps: instructions move
/// down the pipeline one stage per cycle.
#[test]
fn test_stage_trace_progression() {
    use cryptcore::isa::Opcode;

    let program = [encode::addi(1, 0, 1), encode::halt()];
    let mut cpu = cpu_with(&program, &[]);

    let t1 = cpu.step();
    assert_eq!(t1.fetch, Opcode::Addi);
    assert_eq!(t1.decode, Opcode::Nop);
    assert_eq!(t1.execute, Opcode::Nop);

    let t2 = cpu.step();
    assert_eq!(t2.fetch, Opcode::Halt);
    assert_eq!(t2.decode, Opcode::Addi);

    let t3 = cpu.step();
    assert_eq!(t3.decode, Opcode::Halt);
    assert_eq!(t3.execute, Opcode::Addi);

    let t4 = cpu.step();
    assert_eq!(t4.execute, Opcode::Halt);
    assert_eq!(t4.memory, Opcode::Addi);
}

/// Tests that reset restores power-on state while keeping the memory image,
/// so a rerun reproduces the same result.
#[test]
fn test_reset_reproduces_run() {
    let key = 0x0F0F;
    let program = [
        encode::ldk(6, 0, 0),
        encode::ld(1, 0, 1),
        encode::enc(2, 1),
        encode::st(2, 0, 2),
        encode::halt(),
    ];
    let mut cpu = cpu_with(&program, &[key, 0x7777]);

    run(&mut cpu);
    let first = cpu.read_memory_word(2).unwrap();

    cpu.reset();
    assert_eq!(cpu.state().pc, 0);
    assert_eq!(cpu.stats.cycles, 0);

    run(&mut cpu);
    assert_eq!(cpu.read_memory_word(2).unwrap(), first);
}
