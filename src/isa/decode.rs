//! Instruction decoding.
//!
//! Decoding is a pure function with no error path: every 16-bit pattern
//! decodes to *some* instruction, and unrecognized opcode values behave as
//! `Nop` in every stage.

/// Machine opcodes (bits[15:12] of the instruction word).
///
/// A closed enumeration; the four unused encodings (0x8..=0xE) map to `Nop`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Opcode {
    /// Load register from data memory: R\[f1\] = data\[R\[f2\] + imm\].
    Ld,
    /// Store register to data memory: data\[R\[f2\] + imm\] = R\[f1\].
    St,
    /// Add immediate: R\[f1\] = R\[f2\] + imm.
    Addi,
    /// Load cipher key from data memory into K0 (f1 == 6) or K1 (f1 == 7).
    Ldk,
    /// Encrypt: R\[f1\] = encrypt(R\[f2\], K0, K1).
    Enc,
    /// Decrypt: R\[f1\] = decrypt(R\[f2\], K0, K1).
    Dec,
    /// Branch if R\[f1\] != R\[f2\] to pc + 1 + imm.
    Bne,
    /// Stop fetching; the pipeline drains in-flight instructions.
    Halt,
    /// No operation (also the pipeline bubble).
    #[default]
    Nop,
}

impl Opcode {
    /// Maps a 4-bit opcode field to an `Opcode`. Unknown values are `Nop`.
    pub fn from_bits(bits: u8) -> Self {
        match bits {
            0x0 => Self::Ld,
            0x1 => Self::St,
            0x2 => Self::Addi,
            0x3 => Self::Ldk,
            0x4 => Self::Enc,
            0x5 => Self::Dec,
            0x6 => Self::Bne,
            0x7 => Self::Halt,
            _ => Self::Nop,
        }
    }

    /// The 4-bit encoding of this opcode.
    pub fn to_bits(self) -> u16 {
        match self {
            Self::Ld => 0x0,
            Self::St => 0x1,
            Self::Addi => 0x2,
            Self::Ldk => 0x3,
            Self::Enc => 0x4,
            Self::Dec => 0x5,
            Self::Bne => 0x6,
            Self::Halt => 0x7,
            Self::Nop => 0xF,
        }
    }

    /// True for instructions that write a general-purpose register at
    /// writeback.
    pub fn writes_register(self) -> bool {
        matches!(self, Self::Ld | Self::Addi | Self::Enc | Self::Dec)
    }

    /// True for instructions whose result is produced by a data-memory read
    /// (the load-use hazard class).
    pub fn is_load(self) -> bool {
        matches!(self, Self::Ld | Self::Ldk)
    }

    /// Short mnemonic for trace output.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ld => "LD",
            Self::St => "ST",
            Self::Addi => "ADDI",
            Self::Ldk => "LDK",
            Self::Enc => "ENC",
            Self::Dec => "DEC",
            Self::Bne => "BNE",
            Self::Halt => "HALT",
            Self::Nop => "NOP",
        }
    }
}

/// A decoded instruction word.
///
/// Field widths never exceed 3 bits; the immediate is the low 6 bits
/// sign-extended (range \[-32, 31\]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedInstr {
    /// Original instruction word.
    pub raw: u16,
    /// Operation selector (bits\[15:12\]).
    pub opcode: Opcode,
    /// Destination / store-data / first branch operand register, or the
    /// K0/K1 selector for LDK (bits\[11:9\]).
    pub f1: u8,
    /// Base / source / second branch operand register (bits\[8:6\]).
    pub f2: u8,
    /// bits\[5:3\]; extracted for completeness, consumed by no opcode.
    pub f3: u8,
    /// Sign-extended 6-bit immediate (bits\[5:0\]).
    pub imm: i8,
}

impl DecodedInstr {
    /// A NOP bubble.
    pub fn nop() -> Self {
        decode((Opcode::Nop.to_bits()) << 12)
    }

    /// Source registers this instruction reads at decode, in (first, second)
    /// operand order. `None` slots are unused.
    pub fn reads(&self) -> (Option<u8>, Option<u8>) {
        match self.opcode {
            Opcode::Ld | Opcode::Addi | Opcode::Ldk | Opcode::Enc | Opcode::Dec => {
                (Some(self.f2), None)
            }
            // ST reads its base (f2) and the store-data register (f1).
            Opcode::St => (Some(self.f2), Some(self.f1)),
            Opcode::Bne => (Some(self.f1), Some(self.f2)),
            Opcode::Halt | Opcode::Nop => (None, None),
        }
    }

    /// Destination register written at writeback, if any.
    pub fn dest(&self) -> Option<u8> {
        if self.opcode.writes_register() {
            Some(self.f1)
        } else {
            None
        }
    }
}

impl Default for DecodedInstr {
    fn default() -> Self {
        Self::nop()
    }
}

/// Decodes a raw 16-bit instruction word.
///
/// Fixed-position bit slicing; the immediate is sign-extended using
/// two's-complement rules (bit 5 of the 6-bit field is the sign).
pub fn decode(raw: u16) -> DecodedInstr {
    let imm6 = (raw & 0x3F) as u8;
    let imm = if imm6 & 0x20 != 0 {
        (imm6 | 0xC0) as i8
    } else {
        imm6 as i8
    };

    DecodedInstr {
        raw,
        opcode: Opcode::from_bits(((raw >> 12) & 0xF) as u8),
        f1: ((raw >> 9) & 0x7) as u8,
        f2: ((raw >> 6) & 0x7) as u8,
        f3: ((raw >> 3) & 0x7) as u8,
        imm,
    }
}
