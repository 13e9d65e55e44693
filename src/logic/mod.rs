//! One-bit logic primitives.
//!
//! This module provides the core types of the N1-5A data path:
//! - [`Bit`] - A single binary digit, with NOR as the only native gate
//! - [`Word5`] - A 5-bit instruction word (2-bit opcode + 3-bit operand)

mod bit;
mod word;

pub use bit::Bit;
pub use word::{Word5, WordParseError};
