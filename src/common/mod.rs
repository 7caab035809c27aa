//! Common types shared across the simulator.

/// Architectural fault definitions.
pub mod error;

pub use error::Fault;
