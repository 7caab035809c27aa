//! Pipeline stage implementations.
//!
//! Each stage is a pure function over pre-step latch snapshots (plus the
//! memories it owns for that cycle), so the step engine can compute every
//! new latch value before committing any of them.

pub mod decode;
pub mod execute;
pub mod fetch;
pub mod memory_access;
pub mod write_back;
