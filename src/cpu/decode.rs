//! Instruction decoder for the N1-5A.
//!
//! A 5-bit word splits into a 2-bit opcode and a 3-bit operand. Both
//! fields cover their whole range, so decoding is total: there is no
//! illegal instruction.

use crate::logic::Word5;
use serde::{Deserialize, Serialize};

/// The four N1-5A operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// `00` - Load the accumulator from an input (operand 0-6) or from
    /// RAM (operand 7).
    Load,
    /// `01` - Invert the accumulator: NOR against a constant 0. The
    /// operand bits are present in the encoding but the gate never
    /// reads a second input.
    Nor,
    /// `10` - Store the accumulator to an output (operand 0-1) or RAM
    /// (operand 7), or switch banks (operand 2-6).
    Store,
    /// `11` - If the accumulator is 0, jump to line `operand` within
    /// the current bank; otherwise fall through.
    Jump,
}

impl Opcode {
    /// Create from the 2-bit opcode field.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Opcode::Load,
            0b01 => Opcode::Nor,
            0b10 => Opcode::Store,
            0b11 => Opcode::Jump,
            _ => unreachable!(),
        }
    }

    /// The 2-bit opcode field value.
    pub const fn to_bits(self) -> u8 {
        match self {
            Opcode::Load => 0b00,
            Opcode::Nor => 0b01,
            Opcode::Store => 0b10,
            Opcode::Jump => 0b11,
        }
    }
}

/// A decoded instruction: opcode plus raw 3-bit operand.
///
/// The operand's meaning depends on the opcode (input index, output or
/// RAM selector, bank-switch target, jump target line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub opcode: Opcode,
    /// Raw operand field, always in 0-7.
    pub operand: u8,
}

/// Decode a 5-bit word. Total: every word decodes to an instruction.
pub fn decode(word: Word5) -> Instruction {
    Instruction {
        opcode: Opcode::from_bits(word.opcode_bits()),
        operand: word.operand_bits(),
    }
}

/// Encode an instruction back into a 5-bit word.
pub fn encode(instr: &Instruction) -> Word5 {
    Word5::from_bits((instr.opcode.to_bits() << 3) | (instr.operand & 0b111))
}
