//! Memory-image loading and validation.
//!
//! Images are plain text: one 16-bit hex word per line, with `#` comments
//! and blank lines ignored. Malformed or oversized images fail here, before
//! the core is ever invoked.

use crate::core::memory::Memory;
use crate::isa::{DATA_MEM_SIZE, INSTR_MEM_SIZE};
use thiserror::Error;

/// Errors raised while loading a memory image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image file could not be read.
    #[error("failed to read image '{path}': {source}")]
    Io {
        /// Path that failed to open.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line was not a 16-bit hexadecimal word.
    #[error("line {line}: '{text}' is not a 16-bit hex word")]
    BadWord {
        /// 1-based line number.
        line: usize,
        /// Offending text.
        text: String,
    },

    /// The program image exceeds instruction memory.
    #[error("program image has {len} words; instruction memory holds {INSTR_MEM_SIZE}")]
    ProgramTooLarge {
        /// Image length in words.
        len: usize,
    },

    /// The data image exceeds data memory.
    #[error("data image has {len} words; data memory holds {DATA_MEM_SIZE}")]
    DataTooLarge {
        /// Image length in words.
        len: usize,
    },
}

/// Parses a text image into words.
pub fn parse_image(text: &str) -> Result<Vec<u16>, LoadError> {
    let mut words = Vec::new();
    for (idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let cleaned = line.trim_start_matches("0x");
        let word = u16::from_str_radix(cleaned, 16).map_err(|_| LoadError::BadWord {
            line: idx + 1,
            text: line.to_string(),
        })?;
        words.push(word);
    }
    Ok(words)
}

/// Reads and parses an image file.
pub fn read_image(path: &str) -> Result<Vec<u16>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_image(&text)
}

/// Validates and writes a program image into instruction memory, starting at
/// address 0.
pub fn load_program(mem: &mut Memory, words: &[u16]) -> Result<(), LoadError> {
    if words.len() > INSTR_MEM_SIZE {
        return Err(LoadError::ProgramTooLarge { len: words.len() });
    }
    for (pc, &word) in words.iter().enumerate() {
        mem.write_instr(pc as u16, word);
    }
    Ok(())
}

/// Validates and writes a data image into data memory, starting at address 0.
pub fn load_data(mem: &mut Memory, words: &[u16]) -> Result<(), LoadError> {
    if words.len() > DATA_MEM_SIZE {
        return Err(LoadError::DataTooLarge { len: words.len() });
    }
    for (addr, &word) in words.iter().enumerate() {
        // Initial images are within bounds by the check above.
        let _ = mem.write_data(addr as u16, word);
    }
    Ok(())
}
