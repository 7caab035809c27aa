//! Cycle-accurate simulator for a 16-bit block-cipher coprocessor.
//!
//! This crate implements a cycle-level simulator for a small custom processor
//! with a fixed nine-opcode instruction set (load/store, add-immediate,
//! key-load, block encrypt/decrypt, branch-not-equal, halt, no-op). It
//! provides two execution models over the same architectural semantics:
//!
//! * **Single-cycle**: one instruction retires per step; used as the
//!   correctness oracle.
//! * **Pipelined**: a 5-stage in-order pipeline (Fetch, Decode, Execute,
//!   Memory, Writeback) with a register forwarding network, load-use and
//!   key-ordering stalls, and control-hazard flushing.
//!
//! # Modules
//!
//! * `common`: Shared error types.
//! * `config`: Configuration loading and parsing.
//! * `core`: Architectural state, memories, and both execution models.
//! * `crypto`: The 16-bit block-cipher transform pair.
//! * `isa`: Instruction set definitions, decoder, and encoding helpers.
//! * `sim`: Image loaders, demo program, and the run loop.
//! * `stats`: Simulation statistics collection.

/// Shared error types.
///
/// Defines the architectural fault taxonomy reported by both execution
/// models.
pub mod common;

/// Configuration system for tracing and run-loop settings.
///
/// Loads and parses TOML configuration files to customize simulator
/// behavior.
pub mod config;

/// Processor core implementation.
///
/// Contains the architectural state, instruction/data memories, the 5-stage
/// pipelined model (latches, hazard unit, stages, step engine), and the
/// single-cycle reference model.
pub mod core;

/// Block-cipher transform pair.
///
/// A 4-round substitution-permutation network over 16-bit blocks with two
/// 16-bit round keys. `decrypt` is the exact inverse of `encrypt`.
pub mod crypto;

/// Instruction Set Architecture definitions.
///
/// Opcode and decoded-instruction types, the pure instruction decoder, and
/// raw-word encoding helpers used by loaders and tests.
pub mod isa;

/// Simulation harness: memory-image loaders, the built-in demo program, and
/// the cycle-bounded run loop shared by both execution models.
pub mod sim;

/// Simulation statistics collection and reporting.
pub mod stats;
