//! Built-in demo programs.

use crate::core::memory::Memory;
use crate::isa::encode;

/// Demo key stored at data\[0\].
pub const DEMO_KEY: u16 = 0x1234;

/// Demo plaintext stored at data\[1\].
pub const DEMO_PLAINTEXT: u16 = 0xABCD;

/// Builds the single-block encrypt/decrypt demo into `mem`.
///
/// Data: data\[0\] = key, data\[1\] = plaintext. Program: load K0, load the
/// plaintext, encrypt it to data\[2\], decrypt that back to data\[3\], halt.
/// After a run, data\[2\] holds the ciphertext and data\[3\] == data\[1\].
pub fn single_block_program(mem: &mut Memory) {
    mem.clear();

    // write_data cannot fail for these fixed low addresses
    let _ = mem.write_data(0, DEMO_KEY);
    let _ = mem.write_data(1, DEMO_PLAINTEXT);

    let program = [
        encode::ldk(6, 0, 0), // LDK K0, 0(R0)
        encode::ld(1, 0, 1),  // LD  R1, 1(R0)
        encode::enc(2, 1),    // ENC R2, R1
        encode::st(2, 0, 2),  // ST  R2, 2(R0)
        encode::dec(3, 2),    // DEC R3, R2
        encode::st(3, 0, 3),  // ST  R3, 3(R0)
        encode::halt(),       // HALT
    ];

    for (pc, &word) in program.iter().enumerate() {
        mem.write_instr(pc as u16, word);
    }
}
