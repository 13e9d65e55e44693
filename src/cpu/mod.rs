//! CPU emulation for the N1-5A computer.
//!
//! This module implements the complete N1-5A architecture:
//! - 5 instruction banks of 8 five-bit words each
//! - 1-bit data path: accumulator, one RAM cell, 7 inputs, 2 outputs
//! - 4-instruction set (LOAD, NOR, STORE, JUMP) with bank switching

pub mod decode;
pub mod execute;
pub mod memory;
pub mod registers;
pub mod trace;

pub use decode::{decode, encode, Instruction, Opcode};
pub use execute::{Machine, Power, PoweredOff, Snapshot};
pub use memory::Banks;
pub use registers::Registers;
pub use trace::{Trace, TraceEntry, TraceRecord};
