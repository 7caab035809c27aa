//! 16-bit block-cipher transform pair.
//!
//! A 4-round substitution-permutation network: each round XORs K0, rotates
//! left by 3, passes the four nibbles through a 4-bit S-box, and XORs K1.
//! `decrypt` applies the inverse operations in reverse order, so
//! `decrypt(encrypt(x, k0, k1), k0, k1) == x` for all inputs.

const ROUNDS: usize = 4;
const ROT: u32 = 3;

const SBOX: [u8; 16] = [
    0xC, 0x5, 0x6, 0xB, 0x9, 0x0, 0xA, 0xD, 0x3, 0xE, 0xF, 0x8, 0x4, 0x7, 0x1, 0x2,
];

const SBOX_INV: [u8; 16] = [
    0x5, 0xE, 0xF, 0x8, 0xC, 0x1, 0x2, 0xD, 0xB, 0x4, 0x6, 0x3, 0x0, 0x7, 0x9, 0xA,
];

fn sub_nibbles(x: u16, table: &[u8; 16]) -> u16 {
    let mut out = 0;
    for i in 0..4 {
        let nib = ((x >> (i * 4)) & 0xF) as usize;
        out |= (table[nib] as u16) << (i * 4);
    }
    out
}

/// Encrypts one 16-bit block under the key pair (k0, k1).
pub fn encrypt(block: u16, k0: u16, k1: u16) -> u16 {
    let mut state = block;
    for _ in 0..ROUNDS {
        state ^= k0;
        state = state.rotate_left(ROT);
        state = sub_nibbles(state, &SBOX);
        state ^= k1;
    }
    state
}

/// Decrypts one 16-bit block under the key pair (k0, k1).
pub fn decrypt(block: u16, k0: u16, k1: u16) -> u16 {
    let mut state = block;
    for _ in 0..ROUNDS {
        state ^= k1;
        state = sub_nibbles(state, &SBOX_INV);
        state = state.rotate_right(ROT);
        state ^= k0;
    }
    state
}
