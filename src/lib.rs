//! # N1-5A Emulator
//!
//! An emulator of the N1-5A, a minimal 1-bit computer built from NOR
//! logic: 5-bit instructions (2-bit opcode + 3-bit operand), 5
//! instruction banks of 8 words each, a single-bit accumulator and one
//! RAM cell, 7 input switches and 2 output lamps.
//!
//! The [`Machine`] is an owned value with no background activity: the
//! caller drives it one [`Machine::step`] at a time, at whatever
//! cadence it likes, and reads state back through [`Machine::snapshot`]
//! and the execution trace.

pub mod cpu;
pub mod logic;
pub mod prog;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use cpu::{
    decode, encode, Banks, Instruction, Machine, Opcode, Power, PoweredOff, Registers, Snapshot,
    Trace, TraceEntry, TraceRecord,
};
pub use logic::{Bit, Word5};
pub use prog::{listing, LoadDiagnostic};

#[cfg(feature = "tui")]
pub use tui::run_panel;
