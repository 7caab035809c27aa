//! Architectural fault definitions.
//!
//! Faults are fail-stop: the faulting step forces the program counter to the
//! halt sentinel, sets the fault flag, and performs no further state
//! mutation. There is no exception-based control flow inside the core; the
//! run loop inspects the flag after each step.

use thiserror::Error;

/// Fatal architectural faults.
///
/// Unknown opcodes are *not* faults (they execute as NOP by design); the only
/// fault class is a data-memory access outside the addressable range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Fault {
    /// A load (LD or LDK) computed an address outside data memory.
    #[error("load address {addr:#06x} outside data memory")]
    LoadOutOfBounds {
        /// The faulting effective address.
        addr: u16,
    },

    /// A store computed an address outside data memory.
    #[error("store address {addr:#06x} outside data memory")]
    StoreOutOfBounds {
        /// The faulting effective address.
        addr: u16,
    },
}
